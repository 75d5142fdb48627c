use crate::NumRange;
use serde::{Deserialize, Serialize};
use std::ops;

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    /// Create a new RGB color with components in the range [0.0, 1.0].
    /// Components outside that range are clamped into it.
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: Self::COMPONENT_RANGE.clamp(red),
            green: Self::COMPONENT_RANGE.clamp(green),
            blue: Self::COMPONENT_RANGE.clamp(blue),
        }
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Convert this color to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

// Scale a color by a constant
impl ops::Mul<f32> for Color3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.red * rhs, self.green * rhs, self.blue * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(Color3::new_int(0, 128, 255).to_html(), "#0080ff");
        assert_eq!(Color3::new(1.0, 0.0, 0.5).to_html(), "#ff0080");
    }

    #[test]
    fn test_scale() {
        let color = Color3::new_int(100, 200, 50) * 2.0;
        assert_eq!(color.to_ints(), (200, 255, 100));
        assert_eq!(Color3::new(2.0, -1.0, 0.5), Color3::new(1.0, 0.0, 0.5));
    }
}
