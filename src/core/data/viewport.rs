use crate::core::data::canvas_size::{CanvasSize, CanvasSizeError};
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::util::pixel_to_complex_coords::fractional_pixel_to_complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    InvalidCenter(Complex),
    InvalidWidth(f64),
    InvalidHeight(f64),
    ZeroMaxIterations,
    InvalidEscapeRadius(f64),
    InvalidZoomFactor(f64),
    Canvas(CanvasSizeError),
    Region(ComplexRectError),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCenter(center) => {
                write!(f, "viewport centre must be finite: ({}, {})", center.real, center.imag)
            }
            Self::InvalidWidth(width) => {
                write!(f, "viewport width must be positive and finite: {}", width)
            }
            Self::InvalidHeight(height) => {
                write!(f, "viewport height must be positive and finite: {}", height)
            }
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidEscapeRadius(radius) => {
                write!(f, "escape radius must be positive and finite: {}", radius)
            }
            Self::InvalidZoomFactor(factor) => {
                write!(f, "zoom factor must be positive and finite: {}", factor)
            }
            Self::Canvas(err) => write!(f, "canvas error: {}", err),
            Self::Region(err) => write!(f, "region error: {}", err),
        }
    }
}

impl Error for ViewportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            Self::Region(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ComplexRectError> for ViewportError {
    fn from(err: ComplexRectError) -> Self {
        Self::Region(err)
    }
}

impl From<CanvasSizeError> for ViewportError {
    fn from(err: CanvasSizeError) -> Self {
        Self::Canvas(err)
    }
}

/// The common parameters of a render: where to look and how hard to iterate.
///
/// `height: None` derives the plane height from the canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Complex,
    pub width: f64,
    pub height: Option<f64>,
    pub max_iterations: u32,
    pub escape_radius: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        let limits = EscapeLimits::default();

        Self {
            center: Complex::new(-0.5, 0.0),
            width: 3.0,
            height: None,
            max_iterations: limits.max_iterations,
            escape_radius: limits.escape_radius,
        }
    }
}

impl Viewport {
    pub fn validate(&self) -> Result<(), ViewportError> {
        if !self.center.is_finite() {
            return Err(ViewportError::InvalidCenter(self.center));
        }

        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(ViewportError::InvalidWidth(self.width));
        }

        if let Some(height) = self.height {
            if !(height > 0.0 && height.is_finite()) {
                return Err(ViewportError::InvalidHeight(height));
            }
        }

        if self.max_iterations == 0 {
            return Err(ViewportError::ZeroMaxIterations);
        }

        if !(self.escape_radius > 0.0 && self.escape_radius.is_finite()) {
            return Err(ViewportError::InvalidEscapeRadius(self.escape_radius));
        }

        Ok(())
    }

    #[must_use]
    pub fn resolved_height(&self, canvas: CanvasSize) -> f64 {
        self.height.unwrap_or_else(|| {
            self.width * f64::from(canvas.height()) / f64::from(canvas.width())
        })
    }

    /// The plane region covered by `canvas`.
    pub fn region(&self, canvas: CanvasSize) -> Result<ComplexRect, ViewportError> {
        self.validate()?;

        Ok(ComplexRect::from_center(
            self.center,
            self.width,
            self.resolved_height(canvas),
        )?)
    }

    #[must_use]
    pub fn escape_limits(&self) -> EscapeLimits {
        EscapeLimits {
            max_iterations: self.max_iterations,
            escape_radius: self.escape_radius,
        }
    }

    /// The plane point sampled at the centre of pixel `(x, y)`.
    pub fn pixel_to_complex(&self, x: u32, y: u32, canvas: CanvasSize) -> Result<Complex, ViewportError> {
        let region = self.region(canvas)?;

        Ok(fractional_pixel_to_complex(
            f64::from(x) + 0.5,
            f64::from(y) + 0.5,
            canvas.pixel_rect()?,
            region,
        ))
    }

    /// Moves the view so the content follows a drag of `(dx, dy)` pixels.
    #[must_use]
    pub fn panned_by_pixels(&self, dx: f64, dy: f64, canvas: CanvasSize) -> Self {
        let pixel_width = self.width / f64::from(canvas.width());
        let pixel_height = self.resolved_height(canvas) / f64::from(canvas.height());

        Self {
            center: Complex::new(
                self.center.real - dx * pixel_width,
                self.center.imag + dy * pixel_height,
            ),
            ..*self
        }
    }

    /// Zooms by `factor` (> 1 zooms in) keeping the plane point under the
    /// continuous pixel position `(x, y)` fixed on screen.
    pub fn zoomed_at(
        &self,
        x: f64,
        y: f64,
        factor: f64,
        canvas: CanvasSize,
    ) -> Result<Self, ViewportError> {
        if !(factor > 0.0 && factor.is_finite()) {
            return Err(ViewportError::InvalidZoomFactor(factor));
        }

        let region = self.region(canvas)?;
        let anchor = fractional_pixel_to_complex(x, y, canvas.pixel_rect()?, region);
        let center = anchor + Complex::new(
            (self.center.real - anchor.real) / factor,
            (self.center.imag - anchor.imag) / factor,
        );

        let zoomed = Self {
            center,
            width: self.width / factor,
            height: self.height.map(|height| height / factor),
            ..*self
        };
        zoomed.validate()?;

        Ok(zoomed)
    }
}
