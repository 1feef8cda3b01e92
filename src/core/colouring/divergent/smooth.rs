use crate::core::actions::render_tile::ports::divergent_colouring::DivergentColouring;
use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::colouring::wrap_position;
use crate::core::data::colour::Colour;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::Escaped;
use crate::core::data::plugin_params::{ParameterSpec, ResolvedParameters};
use crate::core::errors::RenderError;
use crate::core::registry::plugin_descriptor::DivergentPlugin;

pub const SMOOTH: DivergentPlugin = DivergentPlugin {
    name: "smooth",
    aliases: &["スムーズカラー", "Smooth Color"],
    parameters: &[ParameterSpec::optional("color_scale", 1.0).positive()],
    build,
};

fn build(
    limits: &EscapeLimits,
    params: &ResolvedParameters,
) -> Result<Box<dyn DivergentColouring>, RenderError> {
    Ok(Box::new(SmoothColouring::new(
        params.get("color_scale")?,
        limits.max_iterations,
    )))
}

/// Continuous iteration count scaled into the palette. Positions past the end
/// of the palette wrap around, so large scales cycle the colours.
#[derive(Debug)]
pub struct SmoothColouring {
    color_scale: f64,
    max_iterations: f64,
}

impl SmoothColouring {
    #[must_use]
    pub fn new(color_scale: f64, max_iterations: u32) -> Self {
        Self {
            color_scale,
            max_iterations: f64::from(max_iterations.max(1)),
        }
    }

    #[must_use]
    pub fn position(&self, result: &Escaped) -> f64 {
        wrap_position(result.continuous_iterations() * self.color_scale / self.max_iterations)
    }
}

impl DivergentColouring for SmoothColouring {
    fn colour(&self, result: &Escaped, colormap: &ColormapSampler<'_>) -> Colour {
        colormap.sample(self.position(result))
    }
}
