pub mod calculate_tiles_in_pixel_rect;
pub mod pixel_to_complex_coords;
