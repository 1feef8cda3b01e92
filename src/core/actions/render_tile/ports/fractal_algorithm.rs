use crate::core::data::complex::Complex;
use crate::core::data::iteration_result::IterationResult;
use std::fmt::Debug;

/// An escape-time recurrence with its parameters already bound.
///
/// `evaluate` must be a pure function of `point` so pixels can be computed
/// in any order on any thread.
pub trait FractalAlgorithm: Debug + Send + Sync {
    fn evaluate(&self, point: Complex) -> IterationResult;
}
