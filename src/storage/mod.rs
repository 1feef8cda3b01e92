pub mod colour_pack_store;
pub mod errors;
pub mod jsonc;
pub mod preset_store;
pub mod settings;
