use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::data::colour::Colour;
use crate::core::data::iteration_result::Bounded;
use std::fmt::Debug;

/// Colours points that never escaped.
pub trait NonDivergentColouring: Debug + Send + Sync {
    fn colour(&self, result: &Bounded, colormap: &ColormapSampler<'_>) -> Colour;
}
