use crate::core::colour_maps::errors::ColormapError;
use crate::core::data::canvas_size::CanvasSizeError;
use crate::core::data::iteration_field::IterationFieldError;
use crate::core::data::pixel_buffer::PixelBufferError;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport::ViewportError;
use crate::core::registry::plugin_kind::PluginKind;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
use std::error::Error;
use std::fmt;

/// Everything that can stop a render job. All variants are raised while the
/// job is prepared, before any pixel is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    UnknownPlugin {
        kind: PluginKind,
        name: String,
    },
    InvalidPluginParameters {
        plugin: String,
        reason: String,
    },
    InvalidColormap {
        pack: String,
        map: String,
        source: ColormapError,
    },
    ColormapNotFound {
        pack: String,
        map: String,
    },
    InvalidViewport(ViewportError),
    InvalidCanvas(CanvasSizeError),
    InvalidTile {
        tile: PixelRect,
        canvas: PixelRect,
    },
    PixelOutsideCanvas(PixelToComplexCoordsError),
    Raster(PixelBufferError),
    IterationField(IterationFieldError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlugin { kind, name } => {
                write!(f, "unknown {} plugin '{}'", kind, name)
            }
            Self::InvalidPluginParameters { plugin, reason } => {
                write!(f, "invalid parameters for plugin '{}': {}", plugin, reason)
            }
            Self::InvalidColormap { pack, map, source } => {
                write!(f, "colormap '{}/{}' is invalid: {}", pack, map, source)
            }
            Self::ColormapNotFound { pack, map } => {
                write!(f, "colormap '{}/{}' not found", pack, map)
            }
            Self::InvalidViewport(err) => write!(f, "invalid viewport: {}", err),
            Self::InvalidCanvas(err) => write!(f, "invalid canvas: {}", err),
            Self::InvalidTile { tile, canvas } => {
                write!(
                    f,
                    "tile at x:{}, y:{} ({}x{}) lies outside the {}x{} canvas",
                    tile.top_left().x,
                    tile.top_left().y,
                    tile.width(),
                    tile.height(),
                    canvas.width(),
                    canvas.height()
                )
            }
            Self::PixelOutsideCanvas(err) => write!(f, "{}", err),
            Self::Raster(err) => write!(f, "raster error: {}", err),
            Self::IterationField(err) => write!(f, "iteration field error: {}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidColormap { source, .. } => Some(source),
            Self::InvalidViewport(err) => Some(err),
            Self::InvalidCanvas(err) => Some(err),
            Self::PixelOutsideCanvas(err) => Some(err),
            Self::Raster(err) => Some(err),
            Self::IterationField(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewportError> for RenderError {
    fn from(err: ViewportError) -> Self {
        Self::InvalidViewport(err)
    }
}

impl From<CanvasSizeError> for RenderError {
    fn from(err: CanvasSizeError) -> Self {
        Self::InvalidCanvas(err)
    }
}

impl From<PixelToComplexCoordsError> for RenderError {
    fn from(err: PixelToComplexCoordsError) -> Self {
        Self::PixelOutsideCanvas(err)
    }
}

impl From<PixelBufferError> for RenderError {
    fn from(err: PixelBufferError) -> Self {
        Self::Raster(err)
    }
}

impl From<IterationFieldError> for RenderError {
    fn from(err: IterationFieldError) -> Self {
        Self::IterationField(err)
    }
}
