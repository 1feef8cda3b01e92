use crate::core::actions::render_tile::ports::divergent_colouring::DivergentColouring;
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_tile::ports::iteration_source::IterationSource;
use crate::core::actions::render_tile::ports::non_divergent_colouring::NonDivergentColouring;
use crate::core::actions::render_tile::ports::pixel_source::PixelSource;
use crate::core::colour_maps::colormap::{Colormap, ColormapSampler, ColormapSampling};
use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::iteration_field::{IterationField, IterationFieldError};
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::pixel_buffer::BYTES_PER_PIXEL;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::errors::RenderError;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;
use std::sync::Arc;

/// A job with every plugin and colormap resolved. Immutable and shared by
/// all workers for the duration of one render.
#[derive(Debug)]
pub struct PreparedRender {
    pub(crate) canvas: CanvasSize,
    pub(crate) canvas_rect: PixelRect,
    pub(crate) region: ComplexRect,
    pub(crate) algorithm: Box<dyn FractalAlgorithm>,
    pub(crate) divergent: Box<dyn DivergentColouring>,
    pub(crate) divergent_colormap: Arc<Colormap>,
    pub(crate) non_divergent: Box<dyn NonDivergentColouring>,
    pub(crate) non_divergent_colormap: Arc<Colormap>,
    pub(crate) sampling: ColormapSampling,
}

impl PreparedRender {
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn canvas_rect(&self) -> PixelRect {
        self.canvas_rect
    }

    #[must_use]
    pub fn region(&self) -> ComplexRect {
        self.region
    }

    /// The plane coordinate sampled for `pixel` (its centre).
    pub fn pixel_to_complex(&self, pixel: Point) -> Result<Complex, RenderError> {
        Ok(pixel_to_complex_coords(pixel, self.canvas_rect, self.region)?)
    }

    /// Runs the fractal algorithm at an arbitrary plane coordinate.
    #[must_use]
    pub fn evaluate_point(&self, point: Complex) -> IterationResult {
        self.algorithm.evaluate(point)
    }

    pub fn evaluate_pixel(&self, pixel: Point) -> Result<IterationResult, RenderError> {
        Ok(self.evaluate_point(self.pixel_to_complex(pixel)?))
    }

    /// Dispatches on divergence to the matching colouring and colormap.
    #[must_use]
    pub fn colour(&self, result: &IterationResult) -> Colour {
        match result {
            IterationResult::Escaped(escaped) => self.divergent.colour(
                escaped,
                &ColormapSampler::new(&self.divergent_colormap, self.sampling),
            ),
            IterationResult::Bounded(bounded) => self.non_divergent.colour(
                bounded,
                &ColormapSampler::new(&self.non_divergent_colormap, self.sampling),
            ),
        }
    }

    /// Colours row-major results into RGBA bytes.
    #[must_use]
    pub fn colour_results(&self, results: &[IterationResult]) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(results.len() * BYTES_PER_PIXEL);
        for result in results {
            pixels.extend_from_slice(&self.colour(result).to_array());
        }

        pixels
    }

    /// Colours `tile` from stored results instead of evaluating it.
    pub fn recolour_tile(
        &self,
        field: &IterationField,
        tile: PixelRect,
    ) -> Result<Vec<u8>, RenderError> {
        if field.pixel_rect() != self.canvas_rect {
            return Err(RenderError::from(IterationFieldError::RectMismatch {
                field: field.pixel_rect(),
                canvas: self.canvas_rect,
            }));
        }

        let mut pixels = Vec::with_capacity(tile.size() as usize * BYTES_PER_PIXEL);
        for point in tile.points() {
            pixels.extend_from_slice(&self.colour(field.result(point)?).to_array());
        }

        Ok(pixels)
    }
}

impl IterationSource for PreparedRender {
    type Failure = RenderError;

    fn iteration(&self, pixel: Point) -> Result<IterationResult, Self::Failure> {
        self.evaluate_pixel(pixel)
    }
}

impl PixelSource for PreparedRender {
    type Failure = RenderError;

    fn pixel(&self, pixel: Point) -> Result<Colour, Self::Failure> {
        Ok(self.colour(&self.evaluate_pixel(pixel)?))
    }
}
