//! Tint slider values
//!
//! The three sliders are read live on every redraw. Nothing here is saved.

use crate::color::{self, Hsl};

/// Largest hue slider position, in degrees
pub const HUE_MAX: u16 = 359;
/// Largest saturation and value slider position, in percent
pub const PERCENT_MAX: u8 = 100;

/// Raw slider values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintParams {
    /// Hue in degrees (0 to 359)
    pub hue: u16,
    /// Saturation in percent (0 to 100)
    pub saturation: u8,
    /// Value in percent (0 to 100)
    pub value: u8,
}

impl Default for TintParams {
    /// Sliders start at a neutral white tint
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: 0,
            value: 100,
        }
    }
}

impl TintParams {
    pub fn set_hue(&mut self, hue: u16) {
        self.hue = hue.min(HUE_MAX);
    }

    pub fn set_saturation(&mut self, saturation: u8) {
        self.saturation = saturation.min(PERCENT_MAX);
    }

    pub fn set_value(&mut self, value: u8) {
        self.value = value.min(PERCENT_MAX);
    }

    /// The fill color for the current slider positions
    pub fn fill(&self) -> Hsl {
        color::hsv_to_hsl(
            f64::from(self.hue),
            f64::from(self.saturation) / 100.0,
            f64::from(self.value) / 100.0,
        )
    }
}

/// Numeric labels shown next to the sliders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readouts {
    pub hue: String,
    pub saturation: String,
    pub value: String,
}

impl Readouts {
    /// Mirror the raw slider values
    pub fn refresh(&mut self, tint: &TintParams) {
        self.hue = tint.hue.to_string();
        self.saturation = tint.saturation.to_string();
        self.value = tint.value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut tint = TintParams::default();
        tint.set_hue(400);
        tint.set_saturation(150);
        tint.set_value(101);
        assert_eq!(tint, TintParams { hue: 359, saturation: 100, value: 100 });
    }

    #[test]
    fn test_fill_matches_converter() {
        let tint = TintParams { hue: 120, saturation: 50, value: 80 };
        let fill = tint.fill();
        assert_eq!(fill.hue, 120.0);
        assert!((fill.lightness - 60.0).abs() < 1e-6);
        assert!((fill.saturation - 200.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_readouts_mirror_sliders() {
        let mut readouts = Readouts::default();
        readouts.refresh(&TintParams { hue: 42, saturation: 7, value: 100 });
        assert_eq!(readouts.hue, "42");
        assert_eq!(readouts.saturation, "7");
        assert_eq!(readouts.value, "100");
    }
}
