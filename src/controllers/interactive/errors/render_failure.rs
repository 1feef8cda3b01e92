use crate::core::errors::RenderError;
use std::error::Error;
use std::fmt;

/// A job that was rejected while being prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    pub generation: u64,
    pub error: RenderError,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render {} failed: {}", self.generation, self.error)
    }
}

impl Error for RenderFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
