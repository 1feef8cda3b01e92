use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary PPM (P6). Alpha is dropped.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> std::io::Result<()> {
    // PPM header: P6 means binary RGB, then width, height and max_colour
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
    writeln!(writer, "255")?;
    writer.write_all(&buffer.to_rgb())?;
    writer.flush()
}

#[derive(Debug, Default)]
pub struct PpmFilePresenter {
    create_dirs: bool,
}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates missing parent directories before writing.
    #[must_use]
    pub fn creating_dirs(mut self) -> Self {
        self.create_dirs = true;
        self
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        if self.create_dirs {
            if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(filepath)?;
        write_ppm(buffer, BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::pixel_rect::PixelRect;
    use crate::core::data::point::Point;

    fn two_by_one() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(PixelRect::from_size(2, 1).unwrap());
        buffer
            .set_pixel(Point { x: 0, y: 0 }, Colour::rgba(255, 0, 0, 10))
            .unwrap();
        buffer
            .set_pixel(Point { x: 1, y: 0 }, Colour::rgb(0, 128, 255))
            .unwrap();
        buffer
    }

    #[test]
    fn test_write_ppm_header_and_rgb_payload() {
        let mut bytes = Vec::new();

        write_ppm(&two_by_one(), &mut bytes).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 0, 128, 255]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_presenter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.ppm");

        PpmFilePresenter::new()
            .creating_dirs()
            .present(&two_by_one(), &path)
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(bytes.len(), "P6\n2 1\n255\n".len() + 6);
    }

    #[test]
    fn test_presenter_without_dirs_fails_on_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.ppm");

        assert!(PpmFilePresenter::new().present(&two_by_one(), &path).is_err());
    }
}
