//! Plain RGBA colors as stored in screenshot settings.

use serde::{Deserialize, Serialize};

/// A straight-alpha RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    #[serde(default = "opaque")]
    pub alpha: f64,
}

fn opaque() -> f64 {
    1.0
}

impl RgbaColor {
    pub const WHITE: RgbaColor = RgbaColor::rgb(1.0, 1.0, 1.0);
    pub const BLACK: RgbaColor = RgbaColor::rgb(0.0, 0.0, 0.0);
    /// Teal accent (#14B8A6), the default gradient end color.
    pub const TEAL_PRIMARY: RgbaColor = RgbaColor::rgb(0.078, 0.722, 0.651);

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// The same color with its alpha multiplied by `factor`.
    pub fn with_alpha(&self, factor: f64) -> Self {
        Self {
            alpha: (self.alpha * factor).clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.red), q(self.green), q(self.blue), q(self.alpha)]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f64 / 255.0)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba8_quantizes_and_clamps() {
        assert_eq!(RgbaColor::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(RgbaColor::rgba(1.5, -0.2, 0.5, 0.8).to_rgba8(), [255, 0, 128, 204]);
    }

    #[test]
    fn test_with_alpha_scales_existing_alpha() {
        let c = RgbaColor::rgba(0.1, 0.2, 0.3, 0.5).with_alpha(0.8);
        assert!((c.alpha - 0.4).abs() < 1e-12);
        assert_eq!(c.red, 0.1);
    }

    #[test]
    fn test_from_hex() {
        let teal = RgbaColor::from_hex("#14B8A6").unwrap();
        assert_eq!(teal.to_rgba8(), [0x14, 0xB8, 0xA6, 0xFF]);
        let translucent = RgbaColor::from_hex("00000080").unwrap();
        assert_eq!(translucent.to_rgba8()[3], 0x80);
        assert!(RgbaColor::from_hex("#12345").is_none());
        assert!(RgbaColor::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn test_missing_alpha_defaults_to_opaque() {
        let c: RgbaColor = serde_json::from_str(r#"{"red":1,"green":0,"blue":0}"#).unwrap();
        assert_eq!(c.alpha, 1.0);
    }
}
