use crate::core::colour_maps::errors::ColormapError;
use crate::core::colour_maps::gradient::clamp_position;
use crate::core::data::colour::Colour;

/// A palette without interpolation. Position `p` selects entry
/// `min(floor(p * N), N - 1)`, which gives every entry an equal share of
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrete {
    colours: Vec<Colour>,
}

impl Discrete {
    pub fn new(colours: Vec<Colour>) -> Result<Self, ColormapError> {
        if colours.is_empty() {
            return Err(ColormapError::Empty);
        }

        Ok(Self { colours })
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    #[must_use]
    pub fn sample(&self, position: f64) -> Colour {
        let count = self.colours.len();
        let index = (clamp_position(position) * count as f64).floor() as usize;

        self.colours[index.min(count - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Colour; 3] = [
        Colour::rgb(255, 0, 0),
        Colour::rgb(0, 255, 0),
        Colour::rgb(0, 0, 255),
    ];

    #[test]
    fn test_empty_palette_is_rejected() {
        assert_eq!(Discrete::new(Vec::new()), Err(ColormapError::Empty));
    }

    #[test]
    fn test_three_colour_palette_floor_index() {
        let palette = Discrete::new(PALETTE.to_vec()).unwrap();

        assert_eq!(palette.sample(0.0), PALETTE[0]);
        assert_eq!(palette.sample(0.5), PALETTE[1]);
        assert_eq!(palette.sample(0.999), PALETTE[2]);
    }

    #[test]
    fn test_upper_end_selects_last_colour() {
        let palette = Discrete::new(PALETTE.to_vec()).unwrap();

        assert_eq!(palette.sample(1.0), PALETTE[2]);
        assert_eq!(palette.sample(42.0), PALETTE[2]);
    }

    #[test]
    fn test_below_range_selects_first_colour() {
        let palette = Discrete::new(PALETTE.to_vec()).unwrap();

        assert_eq!(palette.sample(-0.5), PALETTE[0]);
        assert_eq!(palette.sample(f64::NAN), PALETTE[0]);
    }

    #[test]
    fn test_no_interpolation_between_entries() {
        let palette = Discrete::new(PALETTE.to_vec()).unwrap();

        for i in 0..100 {
            let colour = palette.sample(f64::from(i) / 100.0);
            assert!(PALETTE.contains(&colour));
        }
    }
}
