use crate::core::actions::render_tile::ports::divergent_colouring::DivergentColouring;
use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::colouring::wrap_position;
use crate::core::data::colour::Colour;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::Escaped;
use crate::core::data::plugin_params::{ParameterSpec, ResolvedParameters};
use crate::core::errors::RenderError;
use crate::core::registry::plugin_descriptor::DivergentPlugin;

pub const ITERATION_BASED: DivergentPlugin = DivergentPlugin {
    name: "iteration_based",
    aliases: &["反復回数ベース (カラーマップ対応)", "Iteration Based"],
    parameters: &[ParameterSpec::optional("color_scale", 1.0).positive()],
    build,
};

fn build(
    limits: &EscapeLimits,
    params: &ResolvedParameters,
) -> Result<Box<dyn DivergentColouring>, RenderError> {
    Ok(Box::new(IterationBasedColouring::new(
        params.get("color_scale")?,
        limits.max_iterations,
    )))
}

/// Banded colouring from the integer escape count. Points that escape early
/// sit near the end of the palette.
#[derive(Debug)]
pub struct IterationBasedColouring {
    color_scale: f64,
    max_iterations: f64,
}

impl IterationBasedColouring {
    #[must_use]
    pub fn new(color_scale: f64, max_iterations: u32) -> Self {
        Self {
            color_scale,
            max_iterations: f64::from(max_iterations.max(1)),
        }
    }

    #[must_use]
    pub fn position(&self, result: &Escaped) -> f64 {
        let normalised = f64::from(result.iteration_count) / self.max_iterations;

        wrap_position((1.0 - normalised) * self.color_scale)
    }
}

impl DivergentColouring for IterationBasedColouring {
    fn colour(&self, result: &Escaped, colormap: &ColormapSampler<'_>) -> Colour {
        colormap.sample(self.position(result))
    }
}
