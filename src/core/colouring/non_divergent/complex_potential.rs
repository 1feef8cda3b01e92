use crate::core::actions::render_tile::ports::non_divergent_colouring::NonDivergentColouring;
use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::data::colour::Colour;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::Bounded;
use crate::core::data::plugin_params::{ParameterSpec, ResolvedParameters};
use crate::core::errors::RenderError;
use crate::core::registry::plugin_descriptor::NonDivergentPlugin;

pub const COMPLEX_POTENTIAL: NonDivergentPlugin = NonDivergentPlugin {
    name: "complex_potential",
    aliases: &["複素ポテンシャル", "Complex Potential"],
    parameters: &[
        ParameterSpec::optional("potential_offset", 0.0),
        ParameterSpec::optional("potential_scale", 1.0),
    ],
    build,
};

fn build(
    _: &EscapeLimits,
    params: &ResolvedParameters,
) -> Result<Box<dyn NonDivergentColouring>, RenderError> {
    Ok(Box::new(ComplexPotentialColouring {
        offset: params.get("potential_offset")?,
        scale: params.get("potential_scale")?,
    }))
}

#[derive(Debug)]
pub struct ComplexPotentialColouring {
    offset: f64,
    scale: f64,
}

impl ComplexPotentialColouring {
    #[must_use]
    pub fn new(offset: f64, scale: f64) -> Self {
        Self { offset, scale }
    }

    #[must_use]
    pub fn position(&self, result: &Bounded) -> f64 {
        ((result.potential + self.offset) * self.scale).clamp(0.0, 1.0)
    }
}

impl NonDivergentColouring for ComplexPotentialColouring {
    fn colour(&self, result: &Bounded, colormap: &ColormapSampler<'_>) -> Colour {
        colormap.sample(self.position(result))
    }
}
