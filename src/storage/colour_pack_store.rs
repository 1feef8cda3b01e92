use crate::core::colour_maps::builtin::{BUILTIN_PACK, BuiltinColormap};
use crate::core::colour_maps::colormap::Colormap;
use crate::core::colour_maps::discrete::Discrete;
use crate::core::colour_maps::errors::ColormapError;
use crate::core::colour_maps::gradient::{DEFAULT_TABLE_COLOURS, Gradient, GradientStop};
use crate::core::colour_maps::ports::colormap_source::ColormapSource;
use crate::core::data::colour::Colour;
use crate::core::errors::RenderError;
use crate::storage::errors::StoreError;
use crate::storage::jsonc::strip_comments;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PackFile {
    pack_name: String,
    maps: Vec<MapEntry>,
}

#[derive(Debug, Deserialize)]
struct MapEntry {
    map_name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    gradient_points: Option<Vec<GradientPoint>>,
    #[serde(default)]
    num_colors: Option<usize>,
    #[serde(default)]
    colors: Option<Vec<Vec<u8>>>,
}

#[derive(Debug, Deserialize)]
struct GradientPoint {
    pos: f64,
    color: Vec<u8>,
}

fn colour_from_channels(channels: &[u8]) -> Result<Colour, ColormapError> {
    match *channels {
        [r, g, b] => Ok(Colour::rgb(r, g, b)),
        [r, g, b, a] => Ok(Colour::rgba(r, g, b, a)),
        _ => Err(ColormapError::InvalidColour {
            channels: channels.len(),
        }),
    }
}

impl MapEntry {
    fn into_colormap(self) -> Result<Result<Colormap, ColormapError>, String> {
        if let Some(colors) = self.colors {
            let colours = colors
                .iter()
                .map(|channels| colour_from_channels(channels))
                .collect::<Result<Vec<_>, _>>();

            return Ok(colours.and_then(Discrete::new).map(Colormap::from));
        }

        if let Some(points) = self.gradient_points {
            if let Some(kind) = self.kind.as_deref().filter(|kind| *kind != "gradient") {
                return Err(format!("unsupported map type '{}'", kind));
            }

            let stops = points
                .iter()
                .map(|point| {
                    colour_from_channels(&point.color)
                        .map(|colour| GradientStop::new(point.pos, colour))
                })
                .collect::<Result<Vec<_>, _>>();
            let num_colors = self.num_colors.unwrap_or(DEFAULT_TABLE_COLOURS);

            return Ok(stops
                .and_then(|stops| Gradient::new(stops, num_colors))
                .map(Colormap::from));
        }

        Err("map has neither 'colors' nor 'gradient_points'".to_string())
    }
}

type PackMaps = BTreeMap<String, Result<Arc<Colormap>, ColormapError>>;

/// Colour packs keyed by pack name, always including the built-in pack.
///
/// Malformed map definitions are kept and reported as `InvalidColormap` when
/// a render asks for them.
#[derive(Debug, Clone)]
pub struct ColourPackStore {
    packs: BTreeMap<String, PackMaps>,
}

impl Default for ColourPackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ColourPackStore {
    /// A store holding only the built-in pack.
    #[must_use]
    pub fn new() -> Self {
        let builtin = BuiltinColormap::ALL
            .iter()
            .map(|map| {
                (
                    map.map_name().to_string(),
                    map.colormap().map(Arc::new),
                )
            })
            .collect();

        let mut packs = BTreeMap::new();
        packs.insert(BUILTIN_PACK.to_string(), builtin);

        Self { packs }
    }

    /// Loads every `*.json` file in `dir` in file name order. Unreadable or
    /// malformed files are logged and skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let io_error = |source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_error)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "json")
            })
            .collect();
        files.sort();

        let mut store = Self::new();
        for path in files {
            match store.load_file(&path) {
                Ok(count) => log::debug!("loaded {} colour maps from {}", count, path.display()),
                Err(err) => log::warn!("skipping colour pack: {}", err),
            }
        }

        log::info!(
            "{} colour packs available from {}",
            store.packs.len(),
            dir.display()
        );

        Ok(store)
    }

    /// Adds the pack in `path`, returning how many maps it defined.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.add_pack_json(path, &text)
    }

    /// Parses one pack document. Maps from a pack name seen before are merged
    /// in, replacing maps of the same name.
    pub fn add_pack_json(&mut self, origin: &Path, text: &str) -> Result<usize, StoreError> {
        let pack: PackFile =
            serde_json::from_str(&strip_comments(text)).map_err(|source| StoreError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        if pack.pack_name.trim().is_empty() {
            return Err(StoreError::Schema {
                path: origin.to_path_buf(),
                reason: "pack_name must not be empty".to_string(),
            });
        }

        if self.packs.contains_key(&pack.pack_name) {
            log::warn!(
                "colour pack '{}' from {} merges into an existing pack",
                pack.pack_name,
                origin.display()
            );
        }

        let maps = self.packs.entry(pack.pack_name.clone()).or_default();
        let mut count = 0;

        for entry in pack.maps {
            let map_name = entry.map_name.clone();
            if map_name.trim().is_empty() {
                log::warn!("pack '{}' has a map without a name", pack.pack_name);
                continue;
            }

            match entry.into_colormap() {
                Ok(colormap) => {
                    if let Err(err) = &colormap {
                        log::warn!("colormap '{}/{}' is invalid: {}", pack.pack_name, map_name, err);
                    }
                    maps.insert(map_name, colormap.map(Arc::new));
                    count += 1;
                }
                Err(reason) => {
                    log::warn!("skipping '{}/{}': {}", pack.pack_name, map_name, reason);
                }
            }
        }

        Ok(count)
    }

    #[must_use]
    pub fn pack_names(&self) -> Vec<&str> {
        self.packs.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn map_names(&self, pack: &str) -> Vec<&str> {
        self.packs
            .get(pack)
            .map(|maps| maps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl ColormapSource for ColourPackStore {
    fn load(&self, pack: &str, map: &str) -> Result<Arc<Colormap>, RenderError> {
        let entry = self
            .packs
            .get(pack)
            .and_then(|maps| maps.get(map))
            .ok_or_else(|| RenderError::ColormapNotFound {
                pack: pack.to_string(),
                map: map.to_string(),
            })?;

        entry.clone().map_err(|source| RenderError::InvalidColormap {
            pack: pack.to_string(),
            map: map.to_string(),
            source,
        })
    }
}
