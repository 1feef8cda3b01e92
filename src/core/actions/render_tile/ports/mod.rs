pub mod divergent_colouring;
pub mod fractal_algorithm;
pub mod iteration_source;
pub mod non_divergent_colouring;
pub mod pixel_source;
