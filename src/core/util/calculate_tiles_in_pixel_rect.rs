use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::num::NonZeroU32;

/// Splits `pixel_rect` into row-major square tiles of `tile_size` pixels.
/// Tiles on the right and bottom edges are clipped to the rect.
#[must_use]
pub fn calculate_tiles_in_pixel_rect(tile_size: NonZeroU32, pixel_rect: PixelRect) -> Vec<PixelRect> {
    let size = tile_size.get().min(i32::MAX as u32) as i32;
    let top_left = pixel_rect.top_left();
    let bottom_right = pixel_rect.bottom_right();
    let columns = pixel_rect.width().div_ceil(size as u32) as usize;
    let rows = pixel_rect.height().div_ceil(size as u32) as usize;
    let mut tiles = Vec::with_capacity(rows * columns);

    let mut y = top_left.y;
    while y <= bottom_right.y {
        let tile_bottom = y.saturating_add(size - 1).min(bottom_right.y);

        let mut x = top_left.x;
        while x <= bottom_right.x {
            let tile_right = x.saturating_add(size - 1).min(bottom_right.x);

            // corners are ordered and inside the rect, so construction cannot fail
            if let Ok(tile) = PixelRect::new(Point { x, y }, Point { x: tile_right, y: tile_bottom }) {
                tiles.push(tile);
            }

            if tile_right == bottom_right.x {
                break;
            }
            x = tile_right + 1;
        }

        if tile_bottom == bottom_right.y {
            break;
        }
        y = tile_bottom + 1;
    }

    tiles
}
