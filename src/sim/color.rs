//! RGB colors with `#rrggbb` hex encoding
//!
//! Sky colors are configured and reported as hex strings; blending happens
//! per channel on the decoded triple.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` by `factor` (clamped to [0, 1]), rounding each channel
    pub fn lerp(self, other: Rgb, factor: f32) -> Rgb {
        let t = factor.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Normalized RGBA for GPU vertex colors
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive)
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Encode as lowercase `#rrggbb`
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Blend two hex colors; `None` if either fails to parse
pub fn interpolate_hex(from: &str, to: &str, factor: f32) -> Option<String> {
    let a = hex_to_rgb(from)?;
    let b = hex_to_rgb(to)?;
    Some(rgb_to_hex(a.lerp(b, factor)))
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        hex_to_rgb(&value).ok_or(Error::InvalidColor(value))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        rgb_to_hex(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(hex_to_rgb("#87CEEB"), Some(Rgb::new(0x87, 0xce, 0xeb)));
        assert_eq!(hex_to_rgb("1a1a4c"), Some(Rgb::new(0x1a, 0x1a, 0x4c)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
        assert_eq!(hex_to_rgb("#ééé"), None);
    }

    #[test]
    fn test_encode_pads_channels() {
        assert_eq!(rgb_to_hex(Rgb::new(0, 10, 255)), "#000aff");
    }

    #[test]
    fn test_uppercase_normalizes_to_lowercase() {
        let c = hex_to_rgb("#B0E2FF").unwrap();
        assert_eq!(c.to_hex(), "#b0e2ff");
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Rgb::new(0x87, 0xce, 0xeb);
        let b = Rgb::new(0x4a, 0x90, 0xe2);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        // Out-of-range factors are clamped
        assert_eq!(a.lerp(b, -3.0), a);
        assert_eq!(a.lerp(b, 7.5), b);
    }

    #[test]
    fn test_lerp_midpoint_rounds() {
        let mid = Rgb::BLACK.lerp(Rgb::new(255, 1, 3), 0.5);
        assert_eq!(mid, Rgb::new(128, 1, 2));
    }

    #[test]
    fn test_interpolate_hex() {
        assert_eq!(
            interpolate_hex("#000000", "#ffffff", 0.5).as_deref(),
            Some("#808080")
        );
        assert_eq!(interpolate_hex("nope", "#ffffff", 0.5), None);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(26, 26, 76)).unwrap();
        assert_eq!(json, "\"#1a1a4c\"");
        let back: Rgb = serde_json::from_str("\"#0D0D2B\"").unwrap();
        assert_eq!(back, Rgb::new(13, 13, 43));
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(hex in "#[0-9a-f]{6}") {
            let rgb = hex_to_rgb(&hex).unwrap();
            prop_assert_eq!(rgb_to_hex(rgb), hex);
        }

        #[test]
        fn prop_lerp_stays_between(r1: u8, r2: u8, t in 0.0f32..=1.0) {
            let out = Rgb::new(r1, 0, 0).lerp(Rgb::new(r2, 0, 0), t);
            prop_assert!(out.r >= r1.min(r2) && out.r <= r1.max(r2));
        }
    }
}
