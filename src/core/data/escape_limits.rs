/// Bounds shared by every escape-time recurrence in one render.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeLimits {
    pub max_iterations: u32,
    pub escape_radius: f64,
}

impl EscapeLimits {
    #[must_use]
    pub fn escape_radius_squared(&self) -> f64 {
        self.escape_radius * self.escape_radius
    }
}

impl Default for EscapeLimits {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            escape_radius: 2.0,
        }
    }
}
