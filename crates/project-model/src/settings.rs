//! Per-screenshot customization settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::RgbaColor;

/// Device category; each family has its own frame assets and export sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceFamily {
    #[default]
    #[serde(rename = "iPhone", alias = "phone")]
    Phone,
    #[serde(rename = "iPad", alias = "tablet")]
    Tablet,
}

impl DeviceFamily {
    pub const ALL: [DeviceFamily; 2] = [DeviceFamily::Phone, DeviceFamily::Tablet];

    /// Lower-case token used in exported file names.
    pub fn token(&self) -> &'static str {
        match self {
            DeviceFamily::Phone => "phone",
            DeviceFamily::Tablet => "tablet",
        }
    }

    /// Model and colorway portion of this family's frame asset name.
    pub fn frame_model(&self) -> &'static str {
        match self {
            DeviceFamily::Phone => "iPhone 17 Pro - Deep Blue",
            DeviceFamily::Tablet => "iPad Air 13\" - M2 - Space Gray",
        }
    }

    /// Frame asset key: `"{model} - {colorway} - {Portrait|Landscape}"`.
    pub fn frame_asset_name(&self, orientation: Orientation) -> String {
        format!("{} - {}", self.frame_model(), orientation.label())
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DeviceFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phone" | "iphone" => Ok(DeviceFamily::Phone),
            "tablet" | "ipad" => Ok(DeviceFamily::Tablet),
            other => Err(format!("Unknown device family: {other}. Use: phone, tablet")),
        }
    }
}

/// Canvas orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orientation of a `width` x `height` canvas. Square canvases count as landscape.
    pub fn of(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Capitalized label used in frame asset names.
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }

    /// Lower-case token used in exported file names.
    pub fn token(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Where the title block sits relative to the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextPosition {
    #[default]
    Above,
    Below,
}

impl FromStr for TextPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "above" => Ok(TextPosition::Above),
            "below" => Ok(TextPosition::Below),
            other => Err(format!("Unknown text position: {other}. Use: above, below")),
        }
    }
}

/// Canvas background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackgroundStyle {
    #[default]
    Solid,
    Gradient,
}

/// Everything that customizes one screenshot's composite.
///
/// Serialized field names are camelCase so settings files stay
/// interchangeable with earlier exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenshotItemSettings {
    pub title_text: String,
    pub subtitle_text: String,
    /// Title size in frame-native points; scaled with the frame at render time.
    pub title_font_size: f64,
    pub subtitle_font_size: f64,
    pub text_position: TextPosition,
    pub text_color: RgbaColor,
    /// Vertical device shift in frame-native units; positive moves the device up.
    pub screenshot_y_offset: f64,
    #[serde(rename = "deviceType")]
    pub device_family: DeviceFamily,
    pub background_style: BackgroundStyle,
    pub background_color: RgbaColor,
    pub background_gradient_start: RgbaColor,
    pub background_gradient_end: RgbaColor,
    /// Gradient direction in degrees, `0..=360`.
    pub background_gradient_angle: f64,
}

impl Default for ScreenshotItemSettings {
    fn default() -> Self {
        Self {
            title_text: "Your Title Here".to_string(),
            subtitle_text: "Subtitle goes here".to_string(),
            title_font_size: 128.0,
            subtitle_font_size: 94.0,
            text_position: TextPosition::Above,
            text_color: RgbaColor::BLACK,
            screenshot_y_offset: 0.0,
            device_family: DeviceFamily::Phone,
            background_style: BackgroundStyle::Solid,
            background_color: RgbaColor::WHITE,
            background_gradient_start: RgbaColor::WHITE,
            background_gradient_end: RgbaColor::TEAL_PRIMARY,
            background_gradient_angle: 45.0,
        }
    }
}
