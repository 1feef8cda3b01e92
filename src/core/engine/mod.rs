pub mod engine_config;
pub mod fractal_engine;
pub mod prepared_render;
