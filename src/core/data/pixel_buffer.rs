use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 4;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
    TileOutsideBounds {
        tile: PixelRect,
        pixel_rect: PixelRect,
    },
    InvalidDownsampleFactor {
        factor: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of PixelRect bounds top:{}, left:{}, bottom:{}, right:{}",
                    pixel.x,
                    pixel.y,
                    pixel_rect.top_left().y,
                    pixel_rect.top_left().x,
                    pixel_rect.bottom_right().y,
                    pixel_rect.bottom_right().x
                )
            }
            Self::TileOutsideBounds { tile, pixel_rect } => {
                write!(
                    f,
                    "tile {}x{} at x:{}, y:{} does not fit in buffer {}x{}",
                    tile.width(),
                    tile.height(),
                    tile.top_left().x,
                    tile.top_left().y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
            Self::InvalidDownsampleFactor {
                factor,
                width,
                height,
            } => {
                write!(
                    f,
                    "cannot downsample {}x{} by a factor of {}",
                    width, height, factor
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA8 raster. Row 0 is the top of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        let total_bytes = pixel_rect_to_buffer_size(pixel_rect);

        Self {
            pixel_rect,
            buffer: vec![0; total_bytes],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let relative_x = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (pixel.y - self.pixel_rect.top_left().y) as usize;

        Ok((relative_y * self.pixel_rect.width() as usize + relative_x) * BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour::rgba(
            self.buffer[index],
            self.buffer[index + 1],
            self.buffer[index + 2],
            self.buffer[index + 3],
        ))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;

        self.buffer[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour.to_array());

        Ok(())
    }

    /// Copies a rendered tile into place. `tile` is in this buffer's coordinates.
    pub fn write_tile(&mut self, tile: PixelRect, pixels: &[u8]) -> Result<(), PixelBufferError> {
        if !self.pixel_rect.contains_rect(tile) {
            return Err(PixelBufferError::TileOutsideBounds {
                tile,
                pixel_rect: self.pixel_rect,
            });
        }

        let expected = pixel_rect_to_buffer_size(tile);
        if pixels.len() != expected {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: expected,
                buffer_size: pixels.len(),
            });
        }

        let row_bytes = tile.width() as usize * BYTES_PER_PIXEL;
        for (row, source) in pixels.chunks_exact(row_bytes).enumerate() {
            let start = self.index_of(Point {
                x: tile.top_left().x,
                y: tile.top_left().y + row as i32,
            })?;
            self.buffer[start..start + row_bytes].copy_from_slice(source);
        }

        Ok(())
    }

    /// Box-filters `factor x factor` blocks into single pixels.
    pub fn downsample(&self, factor: u32) -> Result<Self, PixelBufferError> {
        let width = self.width();
        let height = self.height();

        if factor == 0 || width % factor != 0 || height % factor != 0 {
            return Err(PixelBufferError::InvalidDownsampleFactor {
                factor,
                width,
                height,
            });
        }

        if factor == 1 {
            return Ok(self.clone());
        }

        let out_width = (width / factor) as usize;
        let out_height = (height / factor) as usize;
        let factor = factor as usize;
        let samples = (factor * factor) as u32;
        let source_stride = width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(out_width * out_height * BYTES_PER_PIXEL);

        for out_y in 0..out_height {
            for out_x in 0..out_width {
                let mut sums = [0u32; BYTES_PER_PIXEL];

                for dy in 0..factor {
                    let row = (out_y * factor + dy) * source_stride;
                    for dx in 0..factor {
                        let index = row + (out_x * factor + dx) * BYTES_PER_PIXEL;
                        for (channel, sum) in sums.iter_mut().enumerate() {
                            *sum += u32::from(self.buffer[index + channel]);
                        }
                    }
                }

                // round half up
                data.extend(sums.iter().map(|sum| ((sum + samples / 2) / samples) as u8));
            }
        }

        let pixel_rect = PixelRect::from_size(out_width as u32, out_height as u32).map_err(
            |_| PixelBufferError::InvalidDownsampleFactor {
                factor: factor as u32,
                width,
                height,
            },
        )?;

        Self::from_data(pixel_rect, data)
    }

    /// Packed RGB bytes with the alpha channel dropped.
    #[must_use]
    pub fn to_rgb(&self) -> Vec<u8> {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
            .collect()
    }
}
