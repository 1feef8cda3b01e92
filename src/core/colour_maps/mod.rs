pub mod builtin;
pub mod colormap;
pub mod discrete;
pub mod errors;
pub mod gradient;
pub mod ports;
