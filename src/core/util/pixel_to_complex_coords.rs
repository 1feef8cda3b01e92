use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToComplexCoordsError {
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideRect { point, pixel_rect } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the rectangle with coords top-left: (x: {}, y: {}) bottom-right: (x: {}, y: {})",
                    point.x,
                    point.y,
                    pixel_rect.top_left().x,
                    pixel_rect.top_left().y,
                    pixel_rect.bottom_right().x,
                    pixel_rect.bottom_right().y
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Maps the centre of `pixel_position` into `complex_rect`.
///
/// Row 0 is the top of the region (largest imaginary part).
pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let relative_pixel_x = f64::from(pixel_position.x - pixel_rect.top_left().x) + 0.5;
    let relative_pixel_y = f64::from(pixel_position.y - pixel_rect.top_left().y) + 0.5;

    Ok(fractional_pixel_to_complex(
        relative_pixel_x,
        relative_pixel_y,
        pixel_rect,
        complex_rect,
    ))
}

/// Maps a continuous position measured in pixels from the rect's top-left
/// corner. Used for zoom anchors, which need not sit on a pixel centre.
#[must_use]
pub fn fractional_pixel_to_complex(
    x: f64,
    y: f64,
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
) -> Complex {
    let real = complex_rect.top_left().real
        + x * (complex_rect.width() / f64::from(pixel_rect.width()));
    let imag = complex_rect.top_left().imag
        - y * (complex_rect.height() / f64::from(pixel_rect.height()));

    Complex { real, imag }
}
