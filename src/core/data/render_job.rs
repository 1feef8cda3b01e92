use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::plugin_params::PluginParams;
use crate::core::data::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FractalDescriptor {
    pub plugin_name: String,
    pub plugin_parameters: PluginParams,
}

impl FractalDescriptor {
    #[must_use]
    pub fn new(plugin_name: impl Into<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            plugin_parameters: PluginParams::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.plugin_parameters.insert(name.into(), value);
        self
    }
}

/// Selects a colouring plugin and the colormap it samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColouringDescriptor {
    pub plugin_name: String,
    #[serde(default)]
    pub plugin_parameters: PluginParams,
    pub pack_name: String,
    pub map_name: String,
}

impl ColouringDescriptor {
    #[must_use]
    pub fn new(
        plugin_name: impl Into<String>,
        pack_name: impl Into<String>,
        map_name: impl Into<String>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            plugin_parameters: PluginParams::new(),
            pack_name: pack_name.into(),
            map_name: map_name.into(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.plugin_parameters.insert(name.into(), value);
        self
    }
}

/// Everything one render pass needs. Never mutated once submitted; a change
/// of any field is a new job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub viewport: Viewport,
    pub fractal: FractalDescriptor,
    pub divergent: ColouringDescriptor,
    pub non_divergent: ColouringDescriptor,
    pub canvas: CanvasSize,
}

impl RenderJob {
    /// Stable within a process. Equal jobs always share a fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        let viewport = &self.viewport;
        viewport.center.real.to_bits().hash(&mut hasher);
        viewport.center.imag.to_bits().hash(&mut hasher);
        viewport.width.to_bits().hash(&mut hasher);
        viewport.height.map(f64::to_bits).hash(&mut hasher);
        viewport.max_iterations.hash(&mut hasher);
        viewport.escape_radius.to_bits().hash(&mut hasher);

        self.fractal.plugin_name.hash(&mut hasher);
        hash_params(&self.fractal.plugin_parameters, &mut hasher);

        for colouring in [&self.divergent, &self.non_divergent] {
            colouring.plugin_name.hash(&mut hasher);
            hash_params(&colouring.plugin_parameters, &mut hasher);
            colouring.pack_name.hash(&mut hasher);
            colouring.map_name.hash(&mut hasher);
        }

        self.canvas.hash(&mut hasher);

        hasher.finish()
    }

    /// True when both jobs compute identical iteration results, so one can
    /// be recoloured from the other's.
    #[must_use]
    pub fn shares_iterations_with(&self, other: &RenderJob) -> bool {
        self.viewport == other.viewport
            && self.fractal == other.fractal
            && self.canvas == other.canvas
    }
}

fn hash_params(params: &PluginParams, hasher: &mut DefaultHasher) {
    params.len().hash(hasher);
    for (name, value) in params {
        name.hash(hasher);
        value.to_bits().hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;

    fn job() -> RenderJob {
        RenderJob {
            viewport: Viewport::default(),
            fractal: FractalDescriptor::new("julia")
                .with_parameter("c_real", -0.745)
                .with_parameter("c_imag", 0.113),
            divergent: ColouringDescriptor::new("smooth", "builtin", "grayscale"),
            non_divergent: ColouringDescriptor::new("complex_potential", "builtin", "grayscale"),
            canvas: CanvasSize::new(800, 600).unwrap(),
        }
    }

    #[test]
    fn test_equal_jobs_share_fingerprint() {
        assert_eq!(job().fingerprint(), job().fingerprint());
    }

    #[test]
    fn test_any_field_change_changes_fingerprint() {
        let base = job().fingerprint();

        let mut moved = job();
        moved.viewport.center = Complex::new(-0.5, 1e-12);

        let mut recoloured = job();
        recoloured.divergent.map_name = "fire".to_string();

        let mut retuned = job();
        retuned.fractal.plugin_parameters.insert("c_imag".to_string(), 0.114);

        let mut resized = job();
        resized.canvas = CanvasSize::new(800, 601).unwrap();

        for changed in [moved, recoloured, retuned, resized] {
            assert_ne!(changed.fingerprint(), base);
        }
    }

    #[test]
    fn test_colour_changes_share_iterations() {
        let mut recoloured = job();
        recoloured.divergent.map_name = "fire".to_string();
        recoloured.non_divergent = ColouringDescriptor::new("solid", "builtin", "fire");

        assert!(job().shares_iterations_with(&recoloured));
    }

    #[test]
    fn test_geometry_changes_do_not_share_iterations() {
        let mut zoomed = job();
        zoomed.viewport.width = 1.5;

        let mut deeper = job();
        deeper.viewport.max_iterations = 500;

        let mut retuned = job();
        retuned.fractal.plugin_parameters.insert("c_imag".to_string(), 0.114);

        let mut resized = job();
        resized.canvas = CanvasSize::new(640, 480).unwrap();

        for changed in [zoomed, deeper, retuned, resized] {
            assert!(!job().shares_iterations_with(&changed));
        }
    }

    #[test]
    fn test_colouring_descriptor_parameters_default_to_empty() {
        let descriptor: ColouringDescriptor = serde_json::from_str(
            r#"{"plugin_name": "smooth", "pack_name": "builtin", "map_name": "fire"}"#,
        )
        .unwrap();

        assert!(descriptor.plugin_parameters.is_empty());
        assert_eq!(descriptor.map_name, "fire");
    }
}
