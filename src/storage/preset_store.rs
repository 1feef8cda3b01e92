use crate::core::colour_maps::builtin::BUILTIN_PACK;
use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::complex::Complex;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::plugin_params::PluginParams;
use crate::core::data::render_job::{ColouringDescriptor, FractalDescriptor, RenderJob};
use crate::core::data::viewport::Viewport;
use crate::storage::errors::StoreError;
use crate::storage::jsonc::strip_comments;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn default_escape_radius() -> f64 {
    EscapeLimits::default().escape_radius
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommonParameters {
    pub center_real: f64,
    pub center_imag: f64,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub max_iterations: u32,
    #[serde(default = "default_escape_radius")]
    pub escape_radius: f64,
}

impl From<CommonParameters> for Viewport {
    fn from(common: CommonParameters) -> Self {
        Self {
            center: Complex::new(common.center_real, common.center_imag),
            width: common.width,
            height: common.height,
            max_iterations: common.max_iterations,
            escape_radius: common.escape_radius,
        }
    }
}

impl From<Viewport> for CommonParameters {
    fn from(viewport: Viewport) -> Self {
        Self {
            center_real: viewport.center.real,
            center_imag: viewport.center.imag,
            width: viewport.width,
            height: viewport.height,
            max_iterations: viewport.max_iterations,
            escape_radius: viewport.escape_radius,
        }
    }
}

/// A saved render setup. Everything in a `RenderJob` except the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub common_parameters: CommonParameters,
    pub fractal_plugin_name: String,
    #[serde(default)]
    pub fractal_plugin_parameters: PluginParams,
    pub coloring_divergent: ColouringDescriptor,
    pub coloring_non_divergent: ColouringDescriptor,
}

impl Preset {
    #[must_use]
    pub fn to_job(&self, canvas: CanvasSize) -> RenderJob {
        RenderJob {
            viewport: self.common_parameters.into(),
            fractal: FractalDescriptor {
                plugin_name: self.fractal_plugin_name.clone(),
                plugin_parameters: self.fractal_plugin_parameters.clone(),
            },
            divergent: self.coloring_divergent.clone(),
            non_divergent: self.coloring_non_divergent.clone(),
            canvas,
        }
    }

    #[must_use]
    pub fn from_job(job: &RenderJob) -> Self {
        Self {
            common_parameters: job.viewport.into(),
            fractal_plugin_name: job.fractal.plugin_name.clone(),
            fractal_plugin_parameters: job.fractal.plugin_parameters.clone(),
            coloring_divergent: job.divergent.clone(),
            coloring_non_divergent: job.non_divergent.clone(),
        }
    }
}

fn builtin_colouring() -> (ColouringDescriptor, ColouringDescriptor) {
    (
        ColouringDescriptor::new("smooth", BUILTIN_PACK, "fire"),
        ColouringDescriptor::new("complex_potential", BUILTIN_PACK, "grayscale"),
    )
}

fn julia_preset(c_real: f64, c_imag: f64) -> Preset {
    let (coloring_divergent, coloring_non_divergent) = builtin_colouring();

    Preset {
        common_parameters: CommonParameters {
            center_real: 0.0,
            center_imag: 0.0,
            width: 3.0,
            height: Some(2.25),
            max_iterations: 200,
            escape_radius: default_escape_radius(),
        },
        fractal_plugin_name: "julia".to_string(),
        fractal_plugin_parameters: PluginParams::from([
            ("c_real".to_string(), c_real),
            ("c_imag".to_string(), c_imag),
        ]),
        coloring_divergent,
        coloring_non_divergent,
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PresetDocument {
    Settings {
        presets: BTreeMap<String, serde_json::Value>,
    },
    Bare(BTreeMap<String, serde_json::Value>),
}

#[derive(Serialize)]
struct SavedPresets<'a> {
    presets: &'a BTreeMap<String, Preset>,
}

/// Named presets, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetStore {
    presets: BTreeMap<String, Preset>,
}

impl PresetStore {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The Mandelbrot home view and a set of well-known Julia constants.
    #[must_use]
    pub fn builtin() -> Self {
        let (coloring_divergent, coloring_non_divergent) = builtin_colouring();
        let mandelbrot = Preset {
            common_parameters: Viewport::default().into(),
            fractal_plugin_name: "mandelbrot".to_string(),
            fractal_plugin_parameters: PluginParams::new(),
            coloring_divergent,
            coloring_non_divergent,
        };

        let mut store = Self::empty();
        store.insert("マンデルブロ", mandelbrot);
        for (name, c_real, c_imag) in [
            ("デンドライト", 0.0, 1.0),
            ("クラシックビューティー", -0.745, 0.113),
            ("ファイゲンバウム点", -1.401155, 0.0),
            ("シーホース", -0.75, 0.1),
            ("ドラゴンテール", -0.8, 0.156),
            ("電気ウナギ", -0.162, 1.04),
            ("雪の結晶", 0.285, 0.01),
            ("スパイラル", -0.778, -0.136),
        ] {
            store.insert(name, julia_preset(c_real, c_imag));
        }

        store
    }

    /// Reads a JSON or JSONC file holding either a preset map or a settings
    /// object with a `presets` key. Malformed presets are logged and skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json_str(path, &text)?;
        log::info!("loaded {} presets from {}", store.presets.len(), path.display());

        Ok(store)
    }

    pub fn from_json_str(origin: &Path, text: &str) -> Result<Self, StoreError> {
        let document: PresetDocument = serde_json::from_str(&strip_comments(text)).map_err(
            |source| StoreError::Parse {
                path: origin.to_path_buf(),
                source,
            },
        )?;

        let entries = match document {
            PresetDocument::Settings { presets } => presets,
            PresetDocument::Bare(presets) => presets,
        };

        let mut store = Self::empty();
        for (name, value) in entries {
            match serde_json::from_value::<Preset>(value) {
                Ok(preset) => store.insert(name, preset),
                Err(err) => log::warn!("skipping preset '{}': {}", name, err),
            }
        }

        Ok(store)
    }

    /// The preset as a render job for `canvas`.
    pub fn get(&self, name: &str, canvas: CanvasSize) -> Result<RenderJob, StoreError> {
        self.preset(name)
            .map(|preset| preset.to_job(canvas))
            .ok_or_else(|| StoreError::PresetNotFound(name.to_string()))
    }

    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// Adds or replaces a preset.
    pub fn insert(&mut self, name: impl Into<String>, preset: Preset) {
        self.presets.insert(name.into(), preset);
    }

    /// Adds every preset of `other`, replacing same-named ones.
    pub fn merge(&mut self, other: PresetStore) {
        self.presets.extend(other.presets);
    }

    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        self.presets.remove(name)
    }

    /// Writes every preset as pretty JSON under a `presets` key.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(&SavedPresets {
            presets: &self.presets,
        })
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, text).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("saved {} presets to {}", self.presets.len(), path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"{
        // window state is ignored
        "window": {"width": 1200},
        "presets": {
            "デンドライト": {
                "common_parameters": {
                    "center_real": 0.0,
                    "center_imag": 0.0,
                    "width": 3.0,
                    "height": 2.25,
                    "max_iterations": 100
                },
                "fractal_plugin_name": "Julia",
                "fractal_plugin_parameters": {"c_real": -0.745, "c_imag": 0.113},
                "coloring_divergent": {
                    "plugin_name": "スムーズカラー",
                    "plugin_parameters": {"color_scale": 1.0},
                    "pack_name": "builtin",
                    "map_name": "grayscale"
                },
                /* no parameters for this one */
                "coloring_non_divergent": {
                    "plugin_name": "複素ポテンシャル",
                    "pack_name": "builtin",
                    "map_name": "grayscale"
                }
            },
            "broken": {"fractal_plugin_name": "Julia"}
        }
    }"#;

    fn canvas() -> CanvasSize {
        CanvasSize::new(800, 600).unwrap()
    }

    #[test]
    fn test_settings_document_loads_valid_presets() {
        let store = PresetStore::from_json_str(Path::new("settings.jsonc"), SETTINGS).unwrap();

        assert_eq!(store.names(), vec!["デンドライト"]);

        let job = store.get("デンドライト", canvas()).unwrap();
        assert_eq!(job.viewport.center, Complex::ZERO);
        assert_eq!(job.viewport.height, Some(2.25));
        assert_eq!(job.viewport.escape_radius, 2.0);
        assert_eq!(job.fractal.plugin_name, "Julia");
        assert_eq!(job.fractal.plugin_parameters["c_imag"], 0.113);
        assert_eq!(job.divergent.plugin_parameters["color_scale"], 1.0);
        assert!(job.non_divergent.plugin_parameters.is_empty());
        assert_eq!(job.canvas, canvas());
    }

    #[test]
    fn test_bare_preset_map_loads() {
        let text = r#"{"home": {
            "common_parameters": {"center_real": -0.5, "center_imag": 0.0, "width": 3.0, "max_iterations": 100, "escape_radius": 4.0},
            "fractal_plugin_name": "mandelbrot",
            "coloring_divergent": {"plugin_name": "smooth", "pack_name": "builtin", "map_name": "fire"},
            "coloring_non_divergent": {"plugin_name": "solid", "pack_name": "builtin", "map_name": "grayscale"}
        }}"#;

        let store = PresetStore::from_json_str(Path::new("presets.json"), text).unwrap();

        let job = store.get("home", canvas()).unwrap();
        assert_eq!(job.viewport.height, None);
        assert_eq!(job.viewport.escape_radius, 4.0);
    }

    #[test]
    fn test_unknown_preset_is_reported() {
        assert!(matches!(
            PresetStore::empty().get("nowhere", canvas()),
            Err(StoreError::PresetNotFound(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        assert!(matches!(
            PresetStore::from_json_str(Path::new("x.json"), "[1, 2"),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_then_load_keeps_presets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("presets.json");
        let store = PresetStore::builtin();

        store.save(&path).unwrap();
        let loaded = PresetStore::load(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_job_converts_back_to_preset() {
        let store = PresetStore::builtin();
        let preset = store.preset("クラシックビューティー").unwrap();

        let job = preset.to_job(canvas());

        assert_eq!(&Preset::from_job(&job), preset);
        assert_eq!(job.fractal.plugin_parameters["c_real"], -0.745);
    }

    #[test]
    fn test_merge_overrides_builtin_presets() {
        let mut store = PresetStore::builtin();
        let loaded = PresetStore::from_json_str(Path::new("settings.jsonc"), SETTINGS).unwrap();

        store.merge(loaded);

        let job = store.get("デンドライト", canvas()).unwrap();
        assert_eq!(job.fractal.plugin_parameters["c_real"], -0.745);
        assert!(store.names().contains(&"マンデルブロ"));
    }

    #[test]
    fn test_insert_replaces_and_remove_deletes() {
        let mut store = PresetStore::builtin();
        let replacement = julia_preset(0.1, 0.2);

        store.insert("シーホース", replacement.clone());
        assert_eq!(store.preset("シーホース"), Some(&replacement));

        assert_eq!(store.remove("シーホース"), Some(replacement));
        assert!(store.preset("シーホース").is_none());
    }
}
