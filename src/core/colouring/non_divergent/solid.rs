use crate::core::actions::render_tile::ports::non_divergent_colouring::NonDivergentColouring;
use crate::core::colour_maps::colormap::ColormapSampler;
use crate::core::data::colour::Colour;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::Bounded;
use crate::core::data::plugin_params::ResolvedParameters;
use crate::core::errors::RenderError;
use crate::core::registry::plugin_descriptor::NonDivergentPlugin;

pub const SOLID: NonDivergentPlugin = NonDivergentPlugin {
    name: "solid",
    aliases: &["Solid"],
    parameters: &[],
    build,
};

fn build(
    _: &EscapeLimits,
    _: &ResolvedParameters,
) -> Result<Box<dyn NonDivergentColouring>, RenderError> {
    Ok(Box::new(SolidColouring))
}

/// Flat interior: every bounded point takes the first palette colour.
#[derive(Debug)]
pub struct SolidColouring;

impl NonDivergentColouring for SolidColouring {
    fn colour(&self, _: &Bounded, colormap: &ColormapSampler<'_>) -> Colour {
        colormap.sample(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_maps::colormap::ColormapSampling;
    use crate::core::colour_maps::builtin::BuiltinColormap;
    use crate::core::data::complex::Complex;

    #[test]
    fn test_always_first_colour() {
        let colormap = BuiltinColormap::Fire.colormap().unwrap();
        let sampler = ColormapSampler::new(&colormap, ColormapSampling::Exact);
        let bounded = Bounded {
            potential: 0.9,
            final_z: Complex::new(1.0, 1.0),
        };

        assert_eq!(SolidColouring.colour(&bounded, &sampler), Colour::BLACK);
    }
}
