use crate::core::colour_maps::colormap::ColormapSampling;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;
use std::thread;

pub const DEFAULT_TILE_SIZE: u32 = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineConfigError {
    ZeroTileSize,
    ZeroWorkers,
}

impl fmt::Display for EngineConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTileSize => write!(f, "tile size must be at least one pixel"),
            Self::ZeroWorkers => write!(f, "worker count must be at least one"),
        }
    }
}

impl Error for EngineConfigError {}

/// Engine construction parameters. Read from the `engine` section of the
/// settings file; every field has a default.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads in the shared pool. `None` uses every available core.
    pub worker_count: Option<usize>,
    /// Edge length of the square tiles, in pixels.
    pub tile_size: u32,
    pub colormap_sampling: ColormapSampling,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            tile_size: DEFAULT_TILE_SIZE,
            colormap_sampling: ColormapSampling::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.tile_size == 0 {
            return Err(EngineConfigError::ZeroTileSize);
        }

        if self.worker_count == Some(0) {
            return Err(EngineConfigError::ZeroWorkers);
        }

        Ok(())
    }

    pub fn tile_size(&self) -> Result<NonZeroU32, EngineConfigError> {
        NonZeroU32::new(self.tile_size).ok_or(EngineConfigError::ZeroTileSize)
    }

    #[must_use]
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
        assert!(EngineConfig::default().resolved_worker_count() >= 1);
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let zero_tiles = EngineConfig {
            tile_size: 0,
            ..EngineConfig::default()
        };
        let zero_workers = EngineConfig {
            worker_count: Some(0),
            ..EngineConfig::default()
        };

        assert_eq!(zero_tiles.validate(), Err(EngineConfigError::ZeroTileSize));
        assert_eq!(zero_workers.validate(), Err(EngineConfigError::ZeroWorkers));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"worker_count": 3}"#).unwrap();

        assert_eq!(config.worker_count, Some(3));
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.colormap_sampling, ColormapSampling::Exact);
    }
}
