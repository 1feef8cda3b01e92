pub mod actions;
pub mod colour_maps;
pub mod colouring;
pub mod data;
pub mod engine;
pub mod errors;
pub mod fractals;
pub mod registry;
pub mod util;
