use crate::core::data::complex::Complex;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::iteration_result::{Bounded, Escaped, IterationResult};

/// Runs `step` from `z0` until `|z|` exceeds the escape radius or the
/// iteration limit is reached. Escape is tested after every step, so a
/// bounded result always has `|final_z| <= escape_radius`.
#[inline]
pub fn iterate<F>(z0: Complex, limits: &EscapeLimits, step: F) -> IterationResult
where
    F: Fn(Complex) -> Complex,
{
    let radius_squared = limits.escape_radius_squared();
    let mut z = z0;

    for iteration in 1..=limits.max_iterations {
        z = step(z);
        let magnitude_squared = z.magnitude_squared();

        // NaN and infinity count as escaped so overflow never poisons a pixel
        if !(magnitude_squared <= radius_squared) {
            return IterationResult::Escaped(Escaped {
                iteration_count: iteration,
                smooth_fraction: smooth_fraction(magnitude_squared, limits.escape_radius),
                final_z: z,
            });
        }
    }

    IterationResult::Bounded(Bounded {
        potential: (z.magnitude() / limits.escape_radius).clamp(0.0, 1.0),
        final_z: z,
    })
}

/// Continuous escape estimate `1 - log2(ln|z| / ln R)`, clamped to `[0, 1)`.
#[must_use]
pub fn smooth_fraction(magnitude_squared: f64, escape_radius: f64) -> f64 {
    if !magnitude_squared.is_finite() || escape_radius <= 1.0 {
        return 0.0;
    }

    let log_magnitude = 0.5 * magnitude_squared.ln();
    let fraction = 1.0 - (log_magnitude / escape_radius.ln()).log2();

    if fraction.is_nan() {
        return 0.0;
    }

    fraction.clamp(0.0, 1.0 - f64::EPSILON)
}
