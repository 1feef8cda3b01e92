use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::plugin_params::{ParameterSpec, ResolvedParameters};
use crate::core::errors::RenderError;
use crate::core::fractals::escape_time::iterate;
use crate::core::registry::plugin_descriptor::FractalPlugin;

pub const JULIA: FractalPlugin = FractalPlugin {
    name: "julia",
    aliases: &["Julia"],
    parameters: &[
        ParameterSpec::required("c_real"),
        ParameterSpec::required("c_imag"),
    ],
    build,
};

fn build(
    limits: &EscapeLimits,
    params: &ResolvedParameters,
) -> Result<Box<dyn FractalAlgorithm>, RenderError> {
    let c = Complex::new(params.get("c_real")?, params.get("c_imag")?);

    Ok(Box::new(JuliaAlgorithm::new(c, *limits)))
}

/// `z -> z^2 + c` with a fixed `c` and `z_0` the sampled point.
#[derive(Debug)]
pub struct JuliaAlgorithm {
    c: Complex,
    limits: EscapeLimits,
}

impl JuliaAlgorithm {
    #[must_use]
    pub fn new(c: Complex, limits: EscapeLimits) -> Self {
        Self { c, limits }
    }
}

impl FractalAlgorithm for JuliaAlgorithm {
    fn evaluate(&self, point: Complex) -> IterationResult {
        let c = self.c;

        iterate(point, &self.limits, |z| z * z + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::plugin_params::PluginParams;

    const DENDRITE_C: Complex = Complex::new(-0.745, 0.113);

    #[test]
    fn test_parameter_point_stays_bounded_for_dendrite() {
        let algorithm = JuliaAlgorithm::new(DENDRITE_C, EscapeLimits::default());

        assert!(!algorithm.evaluate(DENDRITE_C).escaped());
    }

    #[test]
    fn test_parameter_point_eventually_escapes_with_more_iterations() {
        let limits = EscapeLimits {
            max_iterations: 200,
            escape_radius: 2.0,
        };
        let algorithm = JuliaAlgorithm::new(DENDRITE_C, limits);

        assert!(algorithm.evaluate(DENDRITE_C).escaped());
    }

    #[test]
    fn test_distant_start_escapes_immediately() {
        let algorithm = JuliaAlgorithm::new(DENDRITE_C, EscapeLimits::default());

        match algorithm.evaluate(Complex::new(3.0, 0.0)) {
            IterationResult::Escaped(escaped) => assert_eq!(escaped.iteration_count, 1),
            IterationResult::Bounded(_) => panic!("expected escape"),
        }
    }

    #[test]
    fn test_plugin_requires_both_components() {
        let mut params = PluginParams::new();
        params.insert("c_real".to_string(), -0.745);

        let result = JULIA.instantiate(&EscapeLimits::default(), &params);

        assert!(matches!(
            result,
            Err(RenderError::InvalidPluginParameters { plugin, .. }) if plugin == "julia"
        ));
    }

    #[test]
    fn test_plugin_binds_parameters() {
        let params = PluginParams::from([
            ("c_real".to_string(), DENDRITE_C.real),
            ("c_imag".to_string(), DENDRITE_C.imag),
        ]);

        let algorithm = JULIA.instantiate(&EscapeLimits::default(), &params).unwrap();

        assert!(!algorithm.evaluate(DENDRITE_C).escaped());
    }
}
