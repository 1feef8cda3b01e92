use crate::core::errors::RenderError;
use std::collections::BTreeMap;

/// Named numeric plugin parameters. Ordered so equal maps hash identically.
pub type PluginParams = BTreeMap<String, f64>;

/// One parameter a plugin understands. A spec without a default is required.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub default: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParameterSpec {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, default: f64) -> Self {
        Self {
            name,
            default: Some(default),
            min: None,
            max: None,
        }
    }

    /// Restricts the value to `> 0`.
    #[must_use]
    pub const fn positive(self) -> Self {
        Self {
            min: Some(f64::MIN_POSITIVE),
            ..self
        }
    }

    fn check(&self, plugin: &str, value: f64) -> Result<f64, RenderError> {
        let invalid = |reason: String| RenderError::InvalidPluginParameters {
            plugin: plugin.to_string(),
            reason,
        };

        if !value.is_finite() {
            return Err(invalid(format!("'{}' must be finite, got {}", self.name, value)));
        }

        if let Some(min) = self.min {
            if value < min {
                return Err(invalid(format!(
                    "'{}' must be at least {}, got {}",
                    self.name, min, value
                )));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(invalid(format!(
                    "'{}' must be at most {}, got {}",
                    self.name, max, value
                )));
            }
        }

        Ok(value)
    }
}

/// Parameters after defaults were applied and every value was checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    plugin: String,
    values: BTreeMap<&'static str, f64>,
}

impl ResolvedParameters {
    pub fn get(&self, name: &str) -> Result<f64, RenderError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::InvalidPluginParameters {
                plugin: self.plugin.clone(),
                reason: format!("missing required parameter '{}'", name),
            })
    }
}

/// Checks `params` against `specs`. Keys not named by any spec are ignored.
pub fn resolve_parameters(
    plugin: &str,
    specs: &[ParameterSpec],
    params: &PluginParams,
) -> Result<ResolvedParameters, RenderError> {
    let mut values = BTreeMap::new();

    for spec in specs {
        let value = match (params.get(spec.name), spec.default) {
            (Some(&value), _) => value,
            (None, Some(default)) => default,
            (None, None) => {
                return Err(RenderError::InvalidPluginParameters {
                    plugin: plugin.to_string(),
                    reason: format!("missing required parameter '{}'", spec.name),
                });
            }
        };

        values.insert(spec.name, spec.check(plugin, value)?);
    }

    Ok(ResolvedParameters {
        plugin: plugin.to_string(),
        values,
    })
}
