/// An RGBA8 colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel linear interpolation, rounded to the nearest integer.
    ///
    /// `t == 0.0` returns `self` exactly and `t == 1.0` returns `other` exactly.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        fn channel(from: u8, to: u8, t: f64) -> u8 {
            let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
            value.round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: channel(self.r, other.r, t),
            g: channel(self.g, other.g, t),
            b: channel(self.b, other.b, t),
            a: channel(self.a, other.a, t),
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Colour::rgb(1, 2, 3).a, 255);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let from = Colour::rgba(10, 200, 33, 0);
        let to = Colour::rgba(250, 1, 99, 255);

        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn test_lerp_midpoint_rounds() {
        let mid = Colour::BLACK.lerp(Colour::WHITE, 0.5);

        // 127.5 rounds away from zero
        assert_eq!(mid, Colour::rgb(128, 128, 128));
    }

    #[test]
    fn test_to_array() {
        assert_eq!(Colour::rgba(1, 2, 3, 4).to_array(), [1, 2, 3, 4]);
    }
}
