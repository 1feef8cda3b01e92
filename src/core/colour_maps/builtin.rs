use crate::core::colour_maps::colormap::Colormap;
use crate::core::colour_maps::errors::ColormapError;
use crate::core::colour_maps::gradient::{DEFAULT_TABLE_COLOURS, Gradient, GradientStop};
use crate::core::colour_maps::ports::colormap_source::ColormapSource;
use crate::core::data::colour::Colour;
use crate::core::errors::RenderError;
use std::sync::Arc;

pub const BUILTIN_PACK: &str = "builtin";

/// Maps that are always available, independent of any colour pack directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinColormap {
    Grayscale,
    Fire,
    BlueWhite,
}

impl BuiltinColormap {
    pub const ALL: &'static [Self] = &[Self::Grayscale, Self::Fire, Self::BlueWhite];

    #[must_use]
    pub const fn map_name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Fire => "fire",
            Self::BlueWhite => "blue_white",
        }
    }

    #[must_use]
    pub fn from_map_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|map| map.map_name().eq_ignore_ascii_case(name))
    }

    fn stops(self) -> Vec<GradientStop> {
        match self {
            Self::Grayscale => vec![
                GradientStop::new(0.0, Colour::BLACK),
                GradientStop::new(1.0, Colour::WHITE),
            ],
            Self::Fire => vec![
                GradientStop::new(0.0, Colour::BLACK),
                GradientStop::new(0.25, Colour::rgb(255, 0, 0)),
                GradientStop::new(0.5, Colour::rgb(255, 165, 0)),
                GradientStop::new(0.75, Colour::rgb(255, 255, 0)),
                GradientStop::new(1.0, Colour::WHITE),
            ],
            Self::BlueWhite => vec![
                GradientStop::new(0.0, Colour::rgb(0, 7, 100)),
                GradientStop::new(0.16, Colour::rgb(32, 107, 203)),
                GradientStop::new(0.42, Colour::rgb(237, 255, 255)),
                GradientStop::new(0.6425, Colour::rgb(255, 170, 0)),
                GradientStop::new(0.8575, Colour::rgb(0, 2, 0)),
                GradientStop::new(1.0, Colour::rgb(0, 7, 100)),
            ],
        }
    }

    pub fn colormap(self) -> Result<Colormap, ColormapError> {
        Ok(Gradient::new(self.stops(), DEFAULT_TABLE_COLOURS)?.into())
    }
}

/// Serves the built-in pack on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinColormaps;

impl ColormapSource for BuiltinColormaps {
    fn load(&self, pack: &str, map: &str) -> Result<Arc<Colormap>, RenderError> {
        let not_found = || RenderError::ColormapNotFound {
            pack: pack.to_string(),
            map: map.to_string(),
        };

        if !pack.eq_ignore_ascii_case(BUILTIN_PACK) {
            return Err(not_found());
        }

        let builtin = BuiltinColormap::from_map_name(map).ok_or_else(not_found)?;
        let colormap = builtin
            .colormap()
            .map_err(|source| RenderError::InvalidColormap {
                pack: pack.to_string(),
                map: map.to_string(),
                source,
            })?;

        Ok(Arc::new(colormap))
    }
}
