use crate::core::colour_maps::colormap::Colormap;
use crate::core::errors::RenderError;
use std::sync::Arc;

/// Where the engine looks up `(pack, map)` pairs.
///
/// Implementations report a missing map as [`RenderError::ColormapNotFound`]
/// and a malformed one as [`RenderError::InvalidColormap`].
pub trait ColormapSource: Send + Sync {
    fn load(&self, pack: &str, map: &str) -> Result<Arc<Colormap>, RenderError>;
}
