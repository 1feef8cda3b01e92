pub mod canvas_size;
pub mod colour;
pub mod complex;
pub mod complex_rect;
pub mod escape_limits;
pub mod iteration_field;
pub mod iteration_result;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod plugin_params;
pub mod point;
pub mod render_job;
pub mod viewport;
