use crate::core::actions::render_tile::ports::iteration_source::IterationSource;
use crate::core::actions::render_tile::ports::pixel_source::PixelSource;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::pixel_buffer::BYTES_PER_PIXEL;
use crate::core::data::pixel_rect::PixelRect;

/// Computes every pixel of `tile` in row-major order and returns its RGBA bytes.
pub fn render_tile<Src: PixelSource>(source: &Src, tile: PixelRect) -> Result<Vec<u8>, Src::Failure> {
    let mut pixels = Vec::with_capacity(tile.size() as usize * BYTES_PER_PIXEL);

    for point in tile.points() {
        pixels.extend_from_slice(&source.pixel(point)?.to_array());
    }

    Ok(pixels)
}

/// Evaluates every pixel of `tile` in row-major order without colouring it.
pub fn evaluate_tile<Src: IterationSource>(
    source: &Src,
    tile: PixelRect,
) -> Result<Vec<IterationResult>, Src::Failure> {
    tile.points().map(|point| source.iteration(point)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::iteration_result::Escaped;
    use crate::core::data::point::Point;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    struct CoordinateSource;

    impl PixelSource for CoordinateSource {
        type Failure = StubError;

        fn pixel(&self, pixel: Point) -> Result<Colour, Self::Failure> {
            Ok(Colour::rgba(pixel.x as u8, pixel.y as u8, 0, 255))
        }
    }

    struct FailingSource;

    impl PixelSource for FailingSource {
        type Failure = StubError;

        fn pixel(&self, _: Point) -> Result<Colour, Self::Failure> {
            Err(StubError {})
        }
    }

    impl IterationSource for CoordinateSource {
        type Failure = StubError;

        fn iteration(&self, pixel: Point) -> Result<IterationResult, Self::Failure> {
            Ok(IterationResult::Escaped(Escaped {
                iteration_count: (pixel.y * 10 + pixel.x) as u32,
                smooth_fraction: 0.0,
                final_z: Complex::ZERO,
            }))
        }
    }

    impl IterationSource for FailingSource {
        type Failure = StubError;

        fn iteration(&self, _: Point) -> Result<IterationResult, Self::Failure> {
            Err(StubError {})
        }
    }

    #[test]
    fn test_tile_is_row_major_rgba() {
        let tile = PixelRect::new(Point { x: 1, y: 5 }, Point { x: 2, y: 6 }).unwrap();

        let pixels = render_tile(&CoordinateSource, tile).unwrap();

        assert_eq!(
            pixels,
            vec![1, 5, 0, 255, 2, 5, 0, 255, 1, 6, 0, 255, 2, 6, 0, 255]
        );
    }

    #[test]
    fn test_failure_propagates() {
        let tile = PixelRect::from_size(2, 2).unwrap();

        assert_eq!(render_tile(&FailingSource, tile), Err(StubError {}));
    }

    #[test]
    fn test_evaluated_tile_is_row_major() {
        let tile = PixelRect::new(Point { x: 1, y: 5 }, Point { x: 2, y: 6 }).unwrap();

        let counts: Vec<u32> = evaluate_tile(&CoordinateSource, tile)
            .unwrap()
            .iter()
            .map(|result| match result {
                IterationResult::Escaped(escaped) => escaped.iteration_count,
                IterationResult::Bounded(_) => 0,
            })
            .collect();

        assert_eq!(counts, vec![51, 52, 61, 62]);
    }

    #[test]
    fn test_evaluation_failure_propagates() {
        let tile = PixelRect::from_size(2, 2).unwrap();

        assert_eq!(evaluate_tile(&FailingSource, tile), Err(StubError {}));
    }
}
