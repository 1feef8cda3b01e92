use crate::core::data::complex::Complex;
use crate::core::data::iteration_result::{Bounded, IterationResult};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

const UNSET: IterationResult = IterationResult::Bounded(Bounded {
    potential: 0.0,
    final_z: Complex::ZERO,
});

#[derive(Debug, Clone, PartialEq)]
pub enum IterationFieldError {
    PointOutsideBounds {
        point: Point,
        pixel_rect: PixelRect,
    },
    TileOutsideBounds {
        tile: PixelRect,
        pixel_rect: PixelRect,
    },
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
    RectMismatch {
        field: PixelRect,
        canvas: PixelRect,
    },
}

impl fmt::Display for IterationFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideBounds { point, pixel_rect } => {
                write!(
                    f,
                    "point at x:{}, y:{} outside of {}x{} iteration field",
                    point.x,
                    point.y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
            Self::TileOutsideBounds { tile, pixel_rect } => {
                write!(
                    f,
                    "tile {}x{} at x:{}, y:{} does not fit in iteration field {}x{}",
                    tile.width(),
                    tile.height(),
                    tile.top_left().x,
                    tile.top_left().y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {} iteration results, got {}", expected, actual)
            }
            Self::RectMismatch { field, canvas } => {
                write!(
                    f,
                    "iteration field {}x{} does not cover the {}x{} canvas",
                    field.width(),
                    field.height(),
                    canvas.width(),
                    canvas.height()
                )
            }
        }
    }
}

impl Error for IterationFieldError {}

/// Per-pixel iteration results of one render, row-major like `PixelBuffer`.
/// Lets a colour-only change skip the fractal recurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationField {
    pixel_rect: PixelRect,
    results: Vec<IterationResult>,
}

impl IterationField {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            results: vec![UNSET; pixel_rect.size() as usize],
        }
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn results(&self) -> &[IterationResult] {
        &self.results
    }

    fn index_of(&self, point: Point) -> Result<usize, IterationFieldError> {
        if !self.pixel_rect.contains_point(point) {
            return Err(IterationFieldError::PointOutsideBounds {
                point,
                pixel_rect: self.pixel_rect,
            });
        }

        let relative_x = (point.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (point.y - self.pixel_rect.top_left().y) as usize;

        Ok(relative_y * self.pixel_rect.width() as usize + relative_x)
    }

    pub fn result(&self, point: Point) -> Result<&IterationResult, IterationFieldError> {
        Ok(&self.results[self.index_of(point)?])
    }

    /// Stores the row-major results of `tile`.
    pub fn write_tile(
        &mut self,
        tile: PixelRect,
        results: &[IterationResult],
    ) -> Result<(), IterationFieldError> {
        if !self.pixel_rect.contains_rect(tile) {
            return Err(IterationFieldError::TileOutsideBounds {
                tile,
                pixel_rect: self.pixel_rect,
            });
        }

        let expected = tile.size() as usize;
        if results.len() != expected {
            return Err(IterationFieldError::LengthMismatch {
                expected,
                actual: results.len(),
            });
        }

        let row_len = tile.width() as usize;
        for (row, source) in results.chunks_exact(row_len).enumerate() {
            let start = self.index_of(Point {
                x: tile.top_left().x,
                y: tile.top_left().y + row as i32,
            })?;
            self.results[start..start + row_len].copy_from_slice(source);
        }

        Ok(())
    }
}
