use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    InvalidSize { width: i64, height: i64 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "pixel rect size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for PixelRectError {}

/// An inclusive rectangle of pixels. `top_left.y` is the first row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let width = i64::from(bottom_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(bottom_right.y) - i64::from(top_left.y) + 1;

        if width < 1 || height < 1 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// A rect anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Result<Self, PixelRectError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(PixelRectError::InvalidSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        }

        Self::new(
            Point { x: 0, y: 0 },
            Point {
                x: width as i32 - 1,
                y: height as i32 - 1,
            },
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn contains_rect(&self, other: PixelRect) -> bool {
        self.contains_point(other.top_left) && self.contains_point(other.bottom_right)
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Pixels in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top_left.y..=self.bottom_right.y).flat_map(move |y| {
            (self.top_left.x..=self.bottom_right.x).map(move |x| Point { x, y })
        })
    }
}
