pub mod divergent;
pub mod non_divergent;

/// Folds any finite position into `[0, 1)` so palettes repeat.
#[inline]
pub(crate) fn wrap_position(position: f64) -> f64 {
    position.rem_euclid(1.0)
}
