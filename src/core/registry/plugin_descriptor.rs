use crate::core::actions::render_tile::ports::divergent_colouring::DivergentColouring;
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_tile::ports::non_divergent_colouring::NonDivergentColouring;
use crate::core::data::escape_limits::EscapeLimits;
use crate::core::data::plugin_params::{
    ParameterSpec, PluginParams, ResolvedParameters, resolve_parameters,
};
use crate::core::errors::RenderError;

pub type PluginFactory<T> = fn(&EscapeLimits, &ResolvedParameters) -> Result<Box<T>, RenderError>;

/// A named, registrable implementation of one plugin slot.
#[derive(Debug)]
pub struct PluginDescriptor<T: ?Sized> {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub parameters: &'static [ParameterSpec],
    pub build: PluginFactory<T>,
}

pub type FractalPlugin = PluginDescriptor<dyn FractalAlgorithm>;
pub type DivergentPlugin = PluginDescriptor<dyn DivergentColouring>;
pub type NonDivergentPlugin = PluginDescriptor<dyn NonDivergentColouring>;

impl<T: ?Sized> PluginDescriptor<T> {
    /// True when `name` is the plugin name or one of its aliases, ignoring case.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim();

        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .any(|candidate| candidate.to_lowercase() == name.to_lowercase())
    }

    /// Binds `params` after checking them against the declared parameters.
    pub fn instantiate(
        &self,
        limits: &EscapeLimits,
        params: &PluginParams,
    ) -> Result<Box<T>, RenderError> {
        let resolved = resolve_parameters(self.name, self.parameters, params)?;

        (self.build)(limits, &resolved)
    }
}
