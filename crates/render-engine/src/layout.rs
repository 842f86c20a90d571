//! Layout engine: where the device frame, embedded screenshot, and text
//! blocks land on a canvas of a given size.
//!
//! Every rectangle is in canvas pixels with a top-left origin. The scale
//! factor maps frame-native units (the frame bitmap's pixels) to canvas
//! pixels and is the single multiplier for every frame-relative measure:
//! offsets, font sizes, corner radii and insets.

use serde::Serialize;
use storeshot_project_model::geometry::{Rect, RoundedRect};
use storeshot_project_model::settings::{DeviceFamily, TextPosition};

/// Share of the canvas height reserved for the title block.
pub const TEXT_AREA_RATIO: f64 = 0.18;

/// The frame may use at most this share of the canvas width.
pub const MAX_FRAME_WIDTH_RATIO: f64 = 0.85;

/// The frame may use at most this share of the device area's height.
pub const MAX_FRAME_HEIGHT_RATIO: f64 = 0.95;

/// Distance of the subtitle's lower edge above the text area's lower edge,
/// as a share of the text area height.
pub const TEXT_ANCHOR_RATIO: f64 = 0.3;

/// Unscaled gap between the subtitle and title blocks, in canvas pixels.
pub const TITLE_SUBTITLE_GAP: f64 = 10.0;

/// Text block height relative to its scaled font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.5;

/// Bezel measurements tuned to the shipped frame bitmaps.
///
/// Radii and adjustments are in frame-native units; insets are ratios of
/// the rendered frame size. Different frame artwork needs different values,
/// which is why the compositor accepts overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameCalibration {
    /// Horizontal screen inset on each side, relative to frame width.
    pub inset_ratio_x: f64,
    /// Top screen inset, relative to frame height.
    pub inset_ratio_top: f64,
    /// Bottom screen inset, relative to frame height.
    pub inset_ratio_bottom: f64,
    /// Corner radius of the frame's outer silhouette.
    pub outer_corner_radius: f64,
    /// Added to the outer radius so no screenshot pixels leak past the corners.
    pub outer_radius_adjust: f64,
    /// Corner radius of the screen cutout.
    pub inner_corner_radius: f64,
    /// Extra inset applied to the screen rectangle before clipping.
    pub inner_inset_adjust: f64,
}

impl FrameCalibration {
    pub const PHONE: FrameCalibration = FrameCalibration {
        inset_ratio_x: 0.048,
        inset_ratio_top: 0.022,
        inset_ratio_bottom: 0.022,
        outer_corner_radius: 68.0,
        outer_radius_adjust: 8.0,
        inner_corner_radius: 55.0,
        inner_inset_adjust: 8.0,
    };

    pub const TABLET: FrameCalibration = FrameCalibration {
        inset_ratio_x: 0.048,
        inset_ratio_top: 0.022,
        inset_ratio_bottom: 0.022,
        outer_corner_radius: 25.0,
        outer_radius_adjust: 4.0,
        inner_corner_radius: 18.0,
        inner_inset_adjust: 5.0,
    };

    pub fn for_family(family: DeviceFamily) -> Self {
        match family {
            DeviceFamily::Phone => Self::PHONE,
            DeviceFamily::Tablet => Self::TABLET,
        }
    }
}

/// Inputs to [`compute_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Native pixel size of the frame bitmap; `None` when the asset is missing.
    pub frame_size: Option<(u32, u32)>,
    pub text_position: TextPosition,
    pub title_font_size: f64,
    pub subtitle_font_size: f64,
    /// Device shift in frame-native units; positive moves the device up.
    pub y_offset: f64,
    pub calibration: FrameCalibration,
}

/// Computed geometry for one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub device_frame: Rect,
    pub screenshot: Rect,
    pub title: Rect,
    pub subtitle: Rect,
    pub text_area_height: f64,
    pub scale_factor: f64,
    /// Set when the frame asset was missing and placeholder geometry was used.
    pub fallback: bool,
}

/// Clip shapes for the embedded screenshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenClip {
    /// Outer silhouette of the device.
    pub outer: RoundedRect,
    /// Rounded screen area the screenshot is drawn into.
    pub inner: RoundedRect,
}

/// Compute the layout for a canvas.
pub fn compute_layout(input: &LayoutInput) -> Layout {
    let canvas_w = input.canvas_width;
    let canvas_h = input.canvas_height;
    let text_area_height = canvas_h * TEXT_AREA_RATIO;
    let device_area_height = canvas_h - text_area_height;

    let frame_size = input
        .frame_size
        .filter(|(w, h)| *w > 0 && *h > 0)
        .map(|(w, h)| (w as f64, h as f64));

    let Some((frame_w, frame_h)) = frame_size else {
        return fallback_layout(input, text_area_height);
    };

    let width_scale = canvas_w * MAX_FRAME_WIDTH_RATIO / frame_w;
    let height_scale = device_area_height * MAX_FRAME_HEIGHT_RATIO / frame_h;
    let scale_factor = width_scale.min(height_scale);

    let scaled_w = frame_w * scale_factor;
    let scaled_h = frame_h * scale_factor;
    let device_x = (canvas_w - scaled_w) / 2.0;
    let centered_in_area = (device_area_height - scaled_h) / 2.0;
    let device_y = match input.text_position {
        TextPosition::Above => text_area_height + centered_in_area,
        TextPosition::Below => centered_in_area,
    };

    let device_frame = Rect::new(device_x, device_y, scaled_w, scaled_h)
        .offset_y(-input.y_offset * scale_factor);

    let cal = &input.calibration;
    let screenshot = Rect::new(
        device_frame.x + scaled_w * cal.inset_ratio_x,
        device_frame.y + scaled_h * cal.inset_ratio_top,
        scaled_w * (1.0 - 2.0 * cal.inset_ratio_x),
        scaled_h * (1.0 - cal.inset_ratio_top - cal.inset_ratio_bottom),
    );

    let (title, subtitle) = text_rects(input, text_area_height, scale_factor);

    Layout {
        device_frame,
        screenshot,
        title,
        subtitle,
        text_area_height,
        scale_factor,
        fallback: false,
    }
}

/// Placeholder geometry for a missing frame asset.
fn fallback_layout(input: &LayoutInput, text_area_height: f64) -> Layout {
    let w = input.canvas_width;
    let h = input.canvas_height;
    let (title, subtitle) = text_rects(input, text_area_height, 1.0);

    Layout {
        device_frame: Rect::new(w * 0.1, h * 0.2, w * 0.8, h * 0.6),
        screenshot: Rect::new(w * 0.15, h * 0.25, w * 0.7, h * 0.5),
        title,
        subtitle,
        text_area_height,
        scale_factor: 1.0,
        fallback: true,
    }
}

/// Title and subtitle blocks: full canvas width, subtitle anchored 30% above
/// the text area's lower edge, title stacked above it.
fn text_rects(input: &LayoutInput, text_area_height: f64, scale_factor: f64) -> (Rect, Rect) {
    let text_area_bottom = match input.text_position {
        TextPosition::Above => text_area_height,
        TextPosition::Below => input.canvas_height,
    };

    let subtitle_size = input.subtitle_font_size * scale_factor;
    let subtitle_height = subtitle_size * LINE_HEIGHT_FACTOR;
    let subtitle_bottom = text_area_bottom - text_area_height * TEXT_ANCHOR_RATIO;
    let subtitle = Rect::new(
        0.0,
        subtitle_bottom - subtitle_height,
        input.canvas_width,
        subtitle_height,
    );

    let title_height = input.title_font_size * scale_factor * LINE_HEIGHT_FACTOR;
    let title_bottom = subtitle_bottom - subtitle_size - TITLE_SUBTITLE_GAP;
    let title = Rect::new(
        0.0,
        title_bottom - title_height,
        input.canvas_width,
        title_height,
    );

    (title, subtitle)
}

impl Layout {
    /// Clip shapes for the screenshot, derived from the calibration and
    /// scaled with the frame.
    pub fn screen_clip(&self, cal: &FrameCalibration) -> ScreenClip {
        let s = self.scale_factor;
        let outer_radius = (cal.outer_corner_radius + cal.outer_radius_adjust) * s;
        let inset = cal.inner_inset_adjust * s;
        let inner_rect = self.screenshot.inset_by(inset, inset);
        let inner_radius = cal.inner_corner_radius * s + inset * 0.5;

        ScreenClip {
            outer: RoundedRect::new(self.device_frame, outer_radius),
            inner: RoundedRect::new(inner_rect, inner_radius),
        }
    }

    /// A frame-native font size converted to canvas pixels.
    pub fn scaled_font_size(&self, native: f64) -> f64 {
        native * self.scale_factor
    }
}
