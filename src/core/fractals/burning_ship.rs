use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::plugin_params::ResolvedParameters;
use crate::core::errors::RenderError;
use crate::core::fractals::escape_time::iterate;
use crate::core::registry::plugin_descriptor::FractalPlugin;

pub const BURNING_SHIP: FractalPlugin = FractalPlugin {
    name: "burning_ship",
    aliases: &["Burning Ship"],
    parameters: &[],
    build,
};

fn build(
    limits: &EscapeLimits,
    _: &ResolvedParameters,
) -> Result<Box<dyn FractalAlgorithm>, RenderError> {
    Ok(Box::new(BurningShipAlgorithm::new(*limits)))
}

/// `z -> (|Re z| + i|Im z|)^2 + c`, `z_0 = 0`.
#[derive(Debug)]
pub struct BurningShipAlgorithm {
    limits: EscapeLimits,
}

impl BurningShipAlgorithm {
    #[must_use]
    pub fn new(limits: EscapeLimits) -> Self {
        Self { limits }
    }
}

impl FractalAlgorithm for BurningShipAlgorithm {
    fn evaluate(&self, point: Complex) -> IterationResult {
        iterate(Complex::ZERO, &self.limits, |z| {
            let folded = z.abs_components();
            folded * folded + point
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::mandelbrot::MandelbrotAlgorithm;

    #[test]
    fn test_origin_is_bounded() {
        let algorithm = BurningShipAlgorithm::new(EscapeLimits::default());

        assert!(!algorithm.evaluate(Complex::ZERO).escaped());
    }

    #[test]
    fn test_folding_changes_the_orbit() {
        let point = Complex::new(-0.5, 0.5);
        let ship = BurningShipAlgorithm::new(EscapeLimits::default());
        let mandelbrot = MandelbrotAlgorithm::new(EscapeLimits::default());

        assert!(!mandelbrot.evaluate(point).escaped());
        match ship.evaluate(point) {
            IterationResult::Escaped(escaped) => assert_eq!(escaped.iteration_count, 4),
            IterationResult::Bounded(_) => panic!("expected escape"),
        }
    }
}
