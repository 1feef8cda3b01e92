use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::presenters::file::ppm::write_ppm;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, RgbImage, RgbaImage};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const DEFAULT_JPEG_QUALITY: u8 = 90;

/// File formats an export can be written in, chosen by extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Tiff,
    Bmp,
    Ppm,
}

impl ExportFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "ppm" | "pnm" => Some(Self::Ppm),
            _ => None,
        }
    }

    /// PNG and TIFF store the alpha channel; the rest are written as RGB.
    #[must_use]
    pub fn keeps_alpha(self) -> bool {
        matches!(self, Self::Png | Self::Tiff)
    }
}

/// RGB bytes with each pixel composited over a white background.
#[must_use]
pub fn flatten_on_white(buffer: &PixelBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(buffer.buffer().len() / 4 * 3);

    for pixel in buffer.buffer().chunks_exact(4) {
        let alpha = u32::from(pixel[3]);
        for &channel in &pixel[..3] {
            let blended = (u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }

    rgb
}

fn image_error_to_io(err: ImageError) -> io::Error {
    match err {
        ImageError::IoError(err) => err,
        other => io::Error::other(other),
    }
}

fn raster_mismatch() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        "pixel buffer does not match its dimensions",
    )
}

/// Writes PNG, JPEG, TIFF, BMP or PPM depending on the file extension.
#[derive(Debug)]
pub struct ImageFilePresenter {
    create_dirs: bool,
    jpeg_quality: u8,
}

impl Default for ImageFilePresenter {
    fn default() -> Self {
        Self {
            create_dirs: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageFilePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates missing parent directories before writing.
    #[must_use]
    pub fn creating_dirs(mut self) -> Self {
        self.create_dirs = true;
        self
    }

    /// JPEG quality, clamped to 1..=100.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    fn write(&self, buffer: &PixelBuffer, filepath: &Path, format: ExportFormat) -> io::Result<()> {
        let (width, height) = (buffer.width(), buffer.height());

        match format {
            ExportFormat::Ppm => {
                let file = fs::File::create(filepath)?;
                write_ppm(buffer, BufWriter::new(file))
            }
            ExportFormat::Png | ExportFormat::Tiff => {
                let image = RgbaImage::from_raw(width, height, buffer.buffer().clone())
                    .ok_or_else(raster_mismatch)?;
                let image_format = if format == ExportFormat::Png {
                    ImageFormat::Png
                } else {
                    ImageFormat::Tiff
                };

                image
                    .save_with_format(filepath, image_format)
                    .map_err(image_error_to_io)
            }
            ExportFormat::Jpeg => {
                let image = RgbImage::from_raw(width, height, flatten_on_white(buffer))
                    .ok_or_else(raster_mismatch)?;
                let mut writer = BufWriter::new(fs::File::create(filepath)?);

                image
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality))
                    .map_err(image_error_to_io)?;
                writer.flush()
            }
            ExportFormat::Bmp => {
                let image =
                    RgbImage::from_raw(width, height, buffer.to_rgb()).ok_or_else(raster_mismatch)?;

                image
                    .save_with_format(filepath, ImageFormat::Bmp)
                    .map_err(image_error_to_io)
            }
        }
    }
}

impl FilePresenterPort for ImageFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> io::Result<()> {
        let format = ExportFormat::from_path(filepath).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported image format: {}", filepath.display()),
            )
        })?;

        if self.create_dirs {
            if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        log::debug!("writing {:?} image to {}", format, filepath.display());

        self.write(buffer, filepath, format)
    }
}
