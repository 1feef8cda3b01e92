use crate::core::colouring::divergent::iteration_based::ITERATION_BASED;
use crate::core::colouring::divergent::smooth::SMOOTH;
use crate::core::colouring::non_divergent::complex_potential::COMPLEX_POTENTIAL;
use crate::core::colouring::non_divergent::final_z_magnitude::FINAL_Z_MAGNITUDE;
use crate::core::colouring::non_divergent::solid::SOLID;
use crate::core::errors::RenderError;
use crate::core::fractals::burning_ship::BURNING_SHIP;
use crate::core::fractals::julia::JULIA;
use crate::core::fractals::mandelbrot::MANDELBROT;
use crate::core::registry::plugin_descriptor::{
    DivergentPlugin, FractalPlugin, NonDivergentPlugin, PluginDescriptor,
};
use crate::core::registry::plugin_kind::PluginKind;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    EmptyName { kind: PluginKind },
    DuplicateName { kind: PluginKind, name: String },
    DuplicateParameter { plugin: String, parameter: String },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { kind } => write!(f, "{} plugin name must not be empty", kind),
            Self::DuplicateName { kind, name } => {
                write!(f, "{} plugin name '{}' is already registered", kind, name)
            }
            Self::DuplicateParameter { plugin, parameter } => {
                write!(
                    f,
                    "plugin '{}' declares parameter '{}' more than once",
                    plugin, parameter
                )
            }
        }
    }
}

impl Error for RegistrationError {}

/// Name-keyed table of every plugin a render can select. Populated once at
/// startup; lookups are case-insensitive and accept aliases.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    fractals: Vec<FractalPlugin>,
    divergent: Vec<DivergentPlugin>,
    non_divergent: Vec<NonDivergentPlugin>,
}

impl PluginRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every plugin shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            fractals: vec![MANDELBROT, JULIA, BURNING_SHIP],
            divergent: vec![SMOOTH, ITERATION_BASED],
            non_divergent: vec![COMPLEX_POTENTIAL, FINAL_Z_MAGNITUDE, SOLID],
        }
    }

    pub fn register_fractal(&mut self, plugin: FractalPlugin) -> Result<(), RegistrationError> {
        register(&mut self.fractals, PluginKind::Fractal, plugin)
    }

    pub fn register_divergent(
        &mut self,
        plugin: DivergentPlugin,
    ) -> Result<(), RegistrationError> {
        register(&mut self.divergent, PluginKind::DivergentColouring, plugin)
    }

    pub fn register_non_divergent(
        &mut self,
        plugin: NonDivergentPlugin,
    ) -> Result<(), RegistrationError> {
        register(
            &mut self.non_divergent,
            PluginKind::NonDivergentColouring,
            plugin,
        )
    }

    pub fn fractal(&self, name: &str) -> Result<&FractalPlugin, RenderError> {
        resolve(&self.fractals, PluginKind::Fractal, name)
    }

    pub fn divergent(&self, name: &str) -> Result<&DivergentPlugin, RenderError> {
        resolve(&self.divergent, PluginKind::DivergentColouring, name)
    }

    pub fn non_divergent(&self, name: &str) -> Result<&NonDivergentPlugin, RenderError> {
        resolve(&self.non_divergent, PluginKind::NonDivergentColouring, name)
    }

    #[must_use]
    pub fn names(&self, kind: PluginKind) -> Vec<&'static str> {
        match kind {
            PluginKind::Fractal => self.fractals.iter().map(|p| p.name).collect(),
            PluginKind::DivergentColouring => self.divergent.iter().map(|p| p.name).collect(),
            PluginKind::NonDivergentColouring => {
                self.non_divergent.iter().map(|p| p.name).collect()
            }
        }
    }
}

fn register<T: ?Sized>(
    plugins: &mut Vec<PluginDescriptor<T>>,
    kind: PluginKind,
    plugin: PluginDescriptor<T>,
) -> Result<(), RegistrationError> {
    if plugin.name.trim().is_empty() {
        return Err(RegistrationError::EmptyName { kind });
    }

    let names = std::iter::once(plugin.name).chain(plugin.aliases.iter().copied());
    for name in names {
        if plugins.iter().any(|existing| existing.answers_to(name)) {
            return Err(RegistrationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }

    for (i, spec) in plugin.parameters.iter().enumerate() {
        if plugin.parameters[..i].iter().any(|other| other.name == spec.name) {
            return Err(RegistrationError::DuplicateParameter {
                plugin: plugin.name.to_string(),
                parameter: spec.name.to_string(),
            });
        }
    }

    log::debug!("registered {} plugin '{}'", kind, plugin.name);
    plugins.push(plugin);

    Ok(())
}

fn resolve<'a, T: ?Sized>(
    plugins: &'a [PluginDescriptor<T>],
    kind: PluginKind,
    name: &str,
) -> Result<&'a PluginDescriptor<T>, RenderError> {
    plugins
        .iter()
        .find(|plugin| plugin.answers_to(name))
        .ok_or_else(|| RenderError::UnknownPlugin {
            kind,
            name: name.to_string(),
        })
}
