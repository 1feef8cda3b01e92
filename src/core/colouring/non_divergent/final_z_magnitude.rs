use crate::core::actions::render_tile::ports::non_divergent_colouring::NonDivergentColouring;
use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::data::colour::Colour;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::Bounded;
use crate::core::data::plugin_params::{ParameterSpec, ResolvedParameters};
use crate::core::errors::RenderError;
use crate::core::registry::plugin_descriptor::NonDivergentPlugin;

pub const FINAL_Z_MAGNITUDE: NonDivergentPlugin = NonDivergentPlugin {
    name: "final_z_magnitude",
    aliases: &["最終Z絶対値", "Final Z Magnitude"],
    parameters: &[ParameterSpec::optional("gamma", 1.0).positive()],
    build,
};

fn build(
    limits: &EscapeLimits,
    params: &ResolvedParameters,
) -> Result<Box<dyn NonDivergentColouring>, RenderError> {
    Ok(Box::new(FinalZMagnitudeColouring::new(
        params.get("gamma")?,
        limits.escape_radius,
    )))
}

/// `(|z_n| / R)^(1 / gamma)` for the last iterate of a bounded orbit.
#[derive(Debug)]
pub struct FinalZMagnitudeColouring {
    inverse_gamma: f64,
    escape_radius: f64,
}

impl FinalZMagnitudeColouring {
    #[must_use]
    pub fn new(gamma: f64, escape_radius: f64) -> Self {
        Self {
            inverse_gamma: 1.0 / gamma,
            escape_radius,
        }
    }

    #[must_use]
    pub fn position(&self, result: &Bounded) -> f64 {
        let normalised = (result.final_z.magnitude() / self.escape_radius).clamp(0.0, 1.0);

        if normalised > 0.0 {
            normalised.powf(self.inverse_gamma)
        } else {
            0.0
        }
    }
}

impl NonDivergentColouring for FinalZMagnitudeColouring {
    fn colour(&self, result: &Bounded, colormap: &ColormapSampler<'_>) -> Colour {
        colormap.sample(self.position(result))
    }
}
