use crate::core::data::complex::Complex;

/// A point whose orbit left the escape radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Escaped {
    /// The iteration at which `|z_n|` first exceeded the escape radius.
    pub iteration_count: u32,
    /// Sub-iteration escape position in `[0, 1)`.
    pub smooth_fraction: f64,
    pub final_z: Complex,
}

impl Escaped {
    #[must_use]
    pub fn continuous_iterations(&self) -> f64 {
        f64::from(self.iteration_count) + self.smooth_fraction
    }
}

/// A point that stayed inside the escape radius for every iteration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounded {
    /// `|z_n| / escape_radius`, always in `[0, 1]`.
    pub potential: f64,
    pub final_z: Complex,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum IterationResult {
    Escaped(Escaped),
    Bounded(Bounded),
}

impl IterationResult {
    #[must_use]
    pub fn escaped(&self) -> bool {
        matches!(self, Self::Escaped(_))
    }

    #[must_use]
    pub fn final_z(&self) -> Complex {
        match self {
            Self::Escaped(escaped) => escaped.final_z,
            Self::Bounded(bounded) => bounded.final_z,
        }
    }
}
