pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use controllers::export::{ExportController, ExportError, ExportOptions, ExportSummary};
pub use controllers::interactive::{InteractivePresenterPort, JobState, RenderCoordinator, RenderEvent};
pub use crate::core::data::canvas_size::CanvasSize;
pub use crate::core::data::render_job::{ColouringDescriptor, FractalDescriptor, RenderJob};
pub use crate::core::data::viewport::Viewport;
pub use crate::core::engine::engine_config::EngineConfig;
pub use crate::core::engine::fractal_engine::{EngineError, FractalEngine};
pub use crate::core::errors::RenderError;
pub use crate::core::registry::plugin_registry::PluginRegistry;
pub use presenters::channel::channel_presenter::ChannelPresenter;
pub use presenters::file::image_file::{ExportFormat, ImageFilePresenter};
pub use presenters::file::ppm::PpmFilePresenter;
pub use storage::colour_pack_store::ColourPackStore;
pub use storage::preset_store::PresetStore;
pub use storage::settings::Settings;
