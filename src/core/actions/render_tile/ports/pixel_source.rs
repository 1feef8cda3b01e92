use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use std::error::Error;

/// Produces the final colour of a single canvas pixel.
pub trait PixelSource {
    type Failure: Error;

    fn pixel(&self, pixel: Point) -> Result<Colour, Self::Failure>;
}
