pub mod frame_data;
pub mod job_state;
pub mod tile_data;
