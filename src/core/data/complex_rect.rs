use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ComplexRectError {
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for ComplexRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "complex rect size must be positive and finite: {}x{}",
                    width, height
                )
            }
        }
    }
}

impl Error for ComplexRectError {}

/// A region of the complex plane in screen orientation: `top_left` has the
/// smallest real part and the largest imaginary part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    top_left: Complex,
    bottom_right: Complex,
}

impl ComplexRect {
    pub fn new(top_left: Complex, bottom_right: Complex) -> Result<Self, ComplexRectError> {
        let width = bottom_right.real - top_left.real;
        let height = top_left.imag - bottom_right.imag;

        // NaN fails both comparisons, so test for the valid case
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    pub fn from_center(center: Complex, width: f64, height: f64) -> Result<Self, ComplexRectError> {
        Self::new(
            Complex::new(center.real - width / 2.0, center.imag + height / 2.0),
            Complex::new(center.real + width / 2.0, center.imag - height / 2.0),
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Complex {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Complex {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.real - self.top_left.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.top_left.imag - self.bottom_right.imag
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.top_left.real <= point.real
            && self.bottom_right.imag <= point.imag
            && self.bottom_right.real >= point.real
            && self.top_left.imag >= point.imag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_rect_new_valid() {
        let top_left = Complex::new(-2.0, 1.0);
        let bottom_right = Complex::new(1.0, -1.0);

        let rect = ComplexRect::new(top_left, bottom_right).unwrap();

        assert_eq!(rect.top_left(), top_left);
        assert_eq!(rect.bottom_right(), bottom_right);
    }

    #[test]
    fn test_complex_rect_dimensions_must_be_positive() {
        let zero_width = ComplexRect::new(Complex::new(0.0, 1.0), Complex::new(0.0, 0.0));
        let inverted_imag = ComplexRect::new(Complex::new(0.0, 0.0), Complex::new(1.0, 1.0));
        let inverted_both = ComplexRect::new(Complex::new(2.0, -2.0), Complex::new(-2.0, 2.0));

        assert_eq!(
            zero_width,
            Err(ComplexRectError::InvalidSize {
                width: 0.0,
                height: 1.0
            })
        );
        assert_eq!(
            inverted_imag,
            Err(ComplexRectError::InvalidSize {
                width: 1.0,
                height: -1.0
            })
        );
        assert_eq!(
            inverted_both,
            Err(ComplexRectError::InvalidSize {
                width: -4.0,
                height: -4.0
            })
        );
    }

    #[test]
    fn test_complex_rect_rejects_non_finite_sizes() {
        let rect = ComplexRect::new(
            Complex::new(f64::NEG_INFINITY, 1.0),
            Complex::new(0.0, 0.0),
        );

        assert!(rect.is_err());
    }

    #[test]
    fn test_from_center() {
        let rect = ComplexRect::from_center(Complex::new(-0.5, 0.0), 3.0, 2.0).unwrap();

        assert_eq!(rect.top_left(), Complex::new(-2.0, 1.0));
        assert_eq!(rect.bottom_right(), Complex::new(1.0, -1.0));
        assert_eq!(rect.width(), 3.0);
        assert_eq!(rect.height(), 2.0);
    }

    #[test]
    fn test_complex_rect_contains_point() {
        let rect = ComplexRect::new(Complex::new(-10.0, 200.0), Complex::new(100.0, -5.0)).unwrap();

        assert!(rect.contains_point(Complex::new(50.0, 50.0)));
        assert!(rect.contains_point(Complex::new(-10.0, 0.0)));
        assert!(rect.contains_point(Complex::new(100.0, 200.0)));
        assert!(!rect.contains_point(Complex::new(101.0, 50.0)));
        assert!(!rect.contains_point(Complex::new(-11.0, 50.0)));
        assert!(!rect.contains_point(Complex::new(50.0, -6.0)));
        assert!(!rect.contains_point(Complex::new(50.0, 201.0)));
    }
}
