use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CanvasSizeError {
    Empty { width: u32, height: u32 },
    TooLarge { width: u32, height: u32 },
}

impl fmt::Display for CanvasSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { width, height } => {
                write!(f, "canvas must be at least 1x1 pixels: {}x{}", width, height)
            }
            Self::TooLarge { width, height } => {
                write!(f, "canvas {}x{} exceeds the addressable size", width, height)
            }
        }
    }
}

impl Error for CanvasSizeError {}

impl From<PixelRectError> for CanvasSizeError {
    fn from(err: PixelRectError) -> Self {
        match err {
            PixelRectError::InvalidSize { width, height } => Self::Empty {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            },
        }
    }
}

/// Output raster dimensions in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasSizeError> {
        if width == 0 || height == 0 {
            return Err(CanvasSizeError::Empty { width, height });
        }

        let bytes = u64::from(width) * u64::from(height) * 4;
        if width > i32::MAX as u32 || height > i32::MAX as u32 || bytes > isize::MAX as u64 {
            return Err(CanvasSizeError::TooLarge { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn pixel_rect(&self) -> Result<PixelRect, CanvasSizeError> {
        Ok(PixelRect::from_size(self.width, self.height)?)
    }

    /// The canvas multiplied by an integer supersampling factor.
    pub fn scaled(&self, factor: u32) -> Result<Self, CanvasSizeError> {
        let too_large = CanvasSizeError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let width = self.width.checked_mul(factor).ok_or(too_large)?;
        let height = self.height.checked_mul(factor).ok_or(too_large)?;

        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;

    #[test]
    fn test_new_rejects_empty_canvas() {
        assert_eq!(
            CanvasSize::new(0, 600),
            Err(CanvasSizeError::Empty {
                width: 0,
                height: 600
            })
        );
        assert!(CanvasSize::new(800, 0).is_err());
    }

    #[test]
    fn test_pixel_rect_covers_canvas() {
        let canvas = CanvasSize::new(800, 600).unwrap();
        let rect = canvas.pixel_rect().unwrap();

        assert_eq!(rect.bottom_right(), Point { x: 799, y: 599 });
        assert_eq!(rect.size(), canvas.pixel_count());
    }

    #[test]
    fn test_scaled() {
        let canvas = CanvasSize::new(100, 50).unwrap();

        assert_eq!(canvas.scaled(3).unwrap(), CanvasSize::new(300, 150).unwrap());
        assert!(matches!(
            canvas.scaled(u32::MAX),
            Err(CanvasSizeError::TooLarge { .. })
        ));
    }
}
