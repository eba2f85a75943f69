//! Color space conversion utilities
//!
//! The tint sliders work in HSV, but the fill color is expressed as HSL
//! (the same triple a CSS `hsl()` color takes). This module holds that
//! conversion and the step from HSL to the sRGB pixel painted on the canvas.

use image::Rgba;
use palette::{IntoColor, Srgb};

/// A hue/saturation/lightness triple.
///
/// Hue is in degrees and is not normalized. Saturation and lightness are
/// percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Convert HSV (with `s` and `v` between 0 and 1) to HSL.
///
/// The hue passes through untouched. When the lightness lands on 0 (or 2)
/// the saturation division is 0/0; that case yields a saturation of 0.
pub fn hsv_to_hsl(h: f64, s: f64, v: f64) -> Hsl {
    let l = (2.0 - s) * v / 2.0;
    let denominator = if l <= 1.0 { l } else { 2.0 - l };
    let mut new_s = (s * v) / denominator;
    if new_s.is_nan() {
        new_s = 0.0;
    }

    Hsl {
        hue: h,
        saturation: new_s * 100.0,
        lightness: l * 100.0,
    }
}

impl Hsl {
    /// CSS-style color string, e.g. `hsl(120, 66.66666666666667%, 60%)`
    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }

    /// Convert to an opaque 8-bit sRGB pixel.
    pub fn to_rgba(&self) -> Rgba<u8> {
        // palette expects [0, 1] for saturation/lightness; out-of-range values
        // (e.g. a non-finite hue or rounding past 100%) get pinned
        let hue = if self.hue.is_finite() {
            self.hue.rem_euclid(360.0)
        } else {
            0.0
        };
        let saturation = (self.saturation / 100.0).clamp(0.0, 1.0);
        let lightness = (self.lightness / 100.0).clamp(0.0, 1.0);

        let hsl: palette::Hsl = palette::Hsl::new(hue as f32, saturation as f32, lightness as f32);
        let rgb: Srgb = hsl.into_color();
        let rgb: Srgb<u8> = rgb.into_format();

        Rgba([rgb.red, rgb.green, rgb.blue, 255])
    }
}
