use crate::core::data::iteration_result::IterationResult;
use crate::core::data::point::Point;
use std::error::Error;

/// Produces the raw iteration result of a single canvas pixel, before colouring.
pub trait IterationSource {
    type Failure: Error;

    fn iteration(&self, pixel: Point) -> Result<IterationResult, Self::Failure>;
}
