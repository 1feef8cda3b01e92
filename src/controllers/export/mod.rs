mod export_controller;

pub use export_controller::{ExportController, ExportError, ExportOptions, ExportSummary};
