use crate::core::engine::engine_config::EngineConfig;
use crate::storage::errors::StoreError;
use crate::storage::jsonc::strip_comments;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Application settings read from `settings.jsonc`. Unknown sections, such as
/// `presets` or window state, are left to their own readers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub colour_pack_dir: Option<PathBuf>,
}

impl Settings {
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("{} not found, using default settings", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_json_str(path, &text)
    }

    pub fn from_json_str(origin: &Path, text: &str) -> Result<Self, StoreError> {
        let settings: Self =
            serde_json::from_str(&strip_comments(text)).map_err(|source| StoreError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        settings.engine.validate().map_err(|err| StoreError::Schema {
            path: origin.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(settings)
    }
}
