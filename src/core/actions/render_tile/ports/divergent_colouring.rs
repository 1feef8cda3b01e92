use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::data::colour::Colour;
use crate::core::data::iteration_result::Escaped;
use std::fmt::Debug;

/// Colours points whose orbit escaped.
pub trait DivergentColouring: Debug + Send + Sync {
    fn colour(&self, result: &Escaped, colormap: &ColormapSampler<'_>) -> Colour;
}
