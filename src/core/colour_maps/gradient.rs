use crate::core::colour_maps::errors::ColormapError;
use crate::core::data::colour::Colour;

pub const MIN_TABLE_COLOURS: usize = 2;
pub const MAX_TABLE_COLOURS: usize = 256;
pub const DEFAULT_TABLE_COLOURS: usize = 256;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub colour: Colour,
}

impl GradientStop {
    #[must_use]
    pub const fn new(position: f64, colour: Colour) -> Self {
        Self { position, colour }
    }
}

/// Piecewise-linear RGBA gradient over `[0, 1]`.
///
/// Stops are kept stably sorted by position. When several stops share a
/// position the last one owns that exact position, and the interval below it
/// ends at the first one, so a duplicated position is a hard colour edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    table: Vec<Colour>,
}

impl Gradient {
    pub fn new(mut stops: Vec<GradientStop>, num_colors: usize) -> Result<Self, ColormapError> {
        if stops.is_empty() {
            return Err(ColormapError::Empty);
        }

        if let Some(stop) = stops
            .iter()
            .find(|stop| !(0.0..=1.0).contains(&stop.position))
        {
            return Err(ColormapError::InvalidPosition {
                position: stop.position,
            });
        }

        if !(MIN_TABLE_COLOURS..=MAX_TABLE_COLOURS).contains(&num_colors) {
            return Err(ColormapError::InvalidColourCount { num_colors });
        }

        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        let mut gradient = Self {
            stops,
            table: Vec::with_capacity(num_colors),
        };
        let last = (num_colors - 1) as f64;
        gradient.table = (0..num_colors)
            .map(|i| gradient.sample(i as f64 / last))
            .collect();

        Ok(gradient)
    }

    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    #[must_use]
    pub fn num_colors(&self) -> usize {
        self.table.len()
    }

    /// Exact interpolation. Positions outside `[0, 1]` clamp; NaN samples 0.
    #[must_use]
    pub fn sample(&self, position: f64) -> Colour {
        let position = clamp_position(position);
        let index = self.stops.partition_point(|stop| stop.position <= position);

        if index == 0 {
            return self.stops[0].colour;
        }

        let lower = self.stops[index - 1];
        let Some(upper) = self.stops.get(index) else {
            return lower.colour;
        };

        let t = (position - lower.position) / (upper.position - lower.position);
        lower.colour.lerp(upper.colour, t)
    }

    /// O(1) lookup into the pre-sampled `num_colors` table.
    #[must_use]
    pub fn sample_table(&self, position: f64) -> Colour {
        let last = self.table.len() - 1;
        let index = (clamp_position(position) * last as f64).round() as usize;

        self.table[index.min(last)]
    }
}

pub(crate) fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    }
}
