//! Interactive coordinator for progressive fractal rendering.
//!
//! # Architecture
//!
//! The coordinator follows the ports & adapters pattern:
//! - **Input**: `RenderJob` snapshots passed to `submit`
//! - **Output**: `InteractivePresenterPort` receiving tile, completion and failure events
//! - **Core**: the shared `FractalEngine` does the actual computation

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;

pub use controller::RenderCoordinator;
pub use data::frame_data::FrameData;
pub use data::job_state::JobState;
pub use data::tile_data::TileData;
pub use errors::render_failure::RenderFailure;
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::InteractivePresenterPort;
