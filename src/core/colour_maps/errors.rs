use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum ColormapError {
    Empty,
    InvalidPosition { position: f64 },
    InvalidColourCount { num_colors: usize },
    InvalidColour { channels: usize },
}

impl fmt::Display for ColormapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "colormap has no colours"),
            Self::InvalidPosition { position } => {
                write!(f, "gradient position {} is outside [0, 1]", position)
            }
            Self::InvalidColour { channels } => {
                write!(f, "colour needs 3 or 4 channels, got {}", channels)
            }
            Self::InvalidColourCount { num_colors } => {
                write!(
                    f,
                    "num_colors must be between {} and {}, got {}",
                    super::gradient::MIN_TABLE_COLOURS,
                    super::gradient::MAX_TABLE_COLOURS,
                    num_colors
                )
            }
        }
    }
}

impl Error for ColormapError {}
