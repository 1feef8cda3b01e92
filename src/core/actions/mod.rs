pub mod cancellation;
pub mod render_tile;
pub mod render_tiles;
