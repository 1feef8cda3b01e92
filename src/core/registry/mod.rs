pub mod plugin_descriptor;
pub mod plugin_kind;
pub mod plugin_registry;
