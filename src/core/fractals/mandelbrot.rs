use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::plugin_params::ResolvedParameters;
use crate::core::errors::RenderError;
use crate::core::fractals::escape_time::iterate;
use crate::core::registry::plugin_descriptor::FractalPlugin;

pub const MANDELBROT: FractalPlugin = FractalPlugin {
    name: "mandelbrot",
    aliases: &["Mandelbrot"],
    parameters: &[],
    build,
};

fn build(
    limits: &EscapeLimits,
    _: &ResolvedParameters,
) -> Result<Box<dyn FractalAlgorithm>, RenderError> {
    Ok(Box::new(MandelbrotAlgorithm::new(*limits)))
}

/// `z -> z^2 + c` with `c` the sampled point and `z_0 = 0`.
#[derive(Debug)]
pub struct MandelbrotAlgorithm {
    limits: EscapeLimits,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(limits: EscapeLimits) -> Self {
        Self { limits }
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    fn evaluate(&self, point: Complex) -> IterationResult {
        iterate(Complex::ZERO, &self.limits, |z| z * z + point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algorithm() -> MandelbrotAlgorithm {
        MandelbrotAlgorithm::new(EscapeLimits::default())
    }

    #[test]
    fn test_origin_is_bounded() {
        let result = algorithm().evaluate(Complex::ZERO);

        assert!(!result.escaped());
    }

    #[test]
    fn test_period_two_bulb_is_bounded() {
        let result = algorithm().evaluate(Complex::new(-1.0, 0.0));

        assert!(!result.escaped());
        assert!(matches!(result, IterationResult::Bounded(b) if b.potential <= 1.0));
    }

    #[test]
    fn test_far_point_escapes_on_first_iteration() {
        match algorithm().evaluate(Complex::new(2.0, 2.0)) {
            IterationResult::Escaped(escaped) => {
                assert_eq!(escaped.iteration_count, 1);
                assert!((0.0..1.0).contains(&escaped.smooth_fraction));
            }
            IterationResult::Bounded(_) => panic!("(2, 2) must escape"),
        }
    }

    #[test]
    fn test_smoothing_is_continuous_along_real_axis() {
        let algorithm = algorithm();
        let samples = 17_400;
        let mut previous: Option<f64> = None;

        for i in 0..=samples {
            let real = 0.26 + f64::from(i) * (2.0 - 0.26) / f64::from(samples);
            let IterationResult::Escaped(escaped) = algorithm.evaluate(Complex::new(real, 0.0))
            else {
                panic!("real axis beyond 0.25 escapes");
            };
            let value = escaped.continuous_iterations();

            if let Some(previous) = previous {
                assert!(
                    (value - previous).abs() < 1.0,
                    "jump of {} at {}",
                    value - previous,
                    real
                );
            }
            previous = Some(value);
        }
    }

    #[test]
    fn test_nan_point_degrades_to_escaped() {
        let result = algorithm().evaluate(Complex::new(f64::NAN, 0.0));

        assert!(result.escaped());
    }

    #[test]
    fn test_plugin_builds_without_parameters() {
        let algorithm = MANDELBROT
            .instantiate(&EscapeLimits::default(), &Default::default())
            .unwrap();

        assert!(!algorithm.evaluate(Complex::ZERO).escaped());
    }
}
