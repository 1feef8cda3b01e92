pub mod burning_ship;
pub mod escape_time;
pub mod julia;
pub mod mandelbrot;
