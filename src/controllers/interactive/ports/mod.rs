//! Port definitions for the interactive coordinator.
//!
//! Contains trait definitions that define interfaces between the coordinator
//! and the presentation layer.

pub mod presenter_port;
