use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures reading or writing colour packs, presets and settings.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Schema { path: PathBuf, reason: String },
    PresetNotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Parse { path, source } => {
                write!(f, "{}: invalid JSON: {}", path.display(), source)
            }
            Self::Schema { path, reason } => write!(f, "{}: {}", path.display(), reason),
            Self::PresetNotFound(name) => write!(f, "preset '{}' not found", name),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
