use crate::core::data::pixel_rect::PixelRect;

/// One finished tile, RGBA rows of `tile` top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub generation: u64,
    pub tile: PixelRect,
    pub pixels: Vec<u8>,
    pub completed: usize,
    pub total: usize,
}
