//! Compositor: background, screenshot, device frame and text, in that order.
//!
//! There is a single render entry point. Previews and exports differ only in
//! how their [`CompositeRequest`] is built.

use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use storeshot_common::error::{StoreshotError, StoreshotResult};
use storeshot_project_model::export_size::ExportSize;
use storeshot_project_model::project::{ScreenshotItem, ScreenshotProject};
use storeshot_project_model::settings::{
    BackgroundStyle, DeviceFamily, Orientation, ScreenshotItemSettings,
};

use crate::assets::AssetStore;
use crate::layout::{compute_layout, FrameCalibration, Layout, LayoutInput};
use crate::raster;

/// Opacity applied to the subtitle on top of the text color's own alpha.
const SUBTITLE_OPACITY: f64 = 0.8;

/// Everything needed to render one image.
#[derive(Debug, Clone)]
pub struct CompositeRequest {
    /// The screenshot to embed. Rendering fails without one.
    pub screenshot: Option<Arc<RgbaImage>>,

    /// Frame asset key; an unknown key triggers the fallback layout.
    pub frame_name: String,

    /// Settings snapshot used for this render only.
    pub settings: ScreenshotItemSettings,

    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,
}

impl CompositeRequest {
    /// A request whose frame matches the settings' device family and the
    /// canvas orientation.
    pub fn new(
        screenshot: Option<Arc<RgbaImage>>,
        settings: ScreenshotItemSettings,
        width: u32,
        height: u32,
    ) -> Self {
        let frame_name = settings
            .device_family
            .frame_asset_name(Orientation::of(width, height));
        Self {
            screenshot,
            frame_name,
            settings,
            width,
            height,
        }
    }

    /// Render an item with its own stored settings at a catalog size.
    pub fn for_item(item: &ScreenshotItem, size: &ExportSize) -> Self {
        Self {
            screenshot: Some(Arc::clone(&item.image)),
            frame_name: size.frame_asset_name(),
            settings: item.settings.clone(),
            width: size.width,
            height: size.height,
        }
    }

    /// Render the selected item with the live editing snapshot.
    ///
    /// Previews always use the portrait frame, whatever the canvas shape.
    pub fn preview(project: &ScreenshotProject, width: u32, height: u32) -> Self {
        let settings = project.editing().clone();
        Self {
            screenshot: project.selected_item().map(|item| Arc::clone(&item.image)),
            frame_name: settings
                .device_family
                .frame_asset_name(Orientation::Portrait),
            settings,
            width,
            height,
        }
    }
}

/// Renders [`CompositeRequest`]s against a shared, immutable asset store.
///
/// Holds no mutable state, so one compositor can serve concurrent renders.
#[derive(Debug, Clone)]
pub struct Compositor {
    assets: Arc<AssetStore>,
    phone: FrameCalibration,
    tablet: FrameCalibration,
    filter: FilterType,
}

impl Compositor {
    pub fn new(assets: Arc<AssetStore>) -> Self {
        Self {
            assets,
            phone: FrameCalibration::PHONE,
            tablet: FrameCalibration::TABLET,
            filter: FilterType::CatmullRom,
        }
    }

    /// Override the bezel calibration for one device family.
    pub fn with_calibration(mut self, family: DeviceFamily, calibration: FrameCalibration) -> Self {
        match family {
            DeviceFamily::Phone => self.phone = calibration,
            DeviceFamily::Tablet => self.tablet = calibration,
        }
        self
    }

    /// Resampling filter for scaling screenshots and frames.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn calibration(&self, family: DeviceFamily) -> FrameCalibration {
        match family {
            DeviceFamily::Phone => self.phone,
            DeviceFamily::Tablet => self.tablet,
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Layout for a request, without drawing anything.
    pub fn layout(&self, request: &CompositeRequest) -> Layout {
        let settings = &request.settings;
        compute_layout(&LayoutInput {
            canvas_width: request.width as f64,
            canvas_height: request.height as f64,
            frame_size: self.assets.frames.native_size(&request.frame_name),
            text_position: settings.text_position,
            title_font_size: settings.title_font_size,
            subtitle_font_size: settings.subtitle_font_size,
            y_offset: settings.screenshot_y_offset,
            calibration: self.calibration(settings.device_family),
        })
    }

    /// Render a request to an image of exactly `width` x `height` pixels.
    ///
    /// Fails only when no usable screenshot is bound or the size is empty.
    /// A missing frame asset is logged and rendered with fallback geometry.
    pub fn render(&self, request: &CompositeRequest) -> StoreshotResult<RgbaImage> {
        let screenshot = request
            .screenshot
            .as_deref()
            .ok_or_else(|| StoreshotError::render("No screenshot bound to the request"))?;
        if screenshot.width() == 0 || screenshot.height() == 0 {
            return Err(StoreshotError::render("Screenshot has no pixels"));
        }
        if request.width == 0 || request.height == 0 {
            return Err(StoreshotError::render(format!(
                "Invalid output size {}x{}",
                request.width, request.height
            )));
        }

        let settings = &request.settings;
        let mut canvas = RgbaImage::new(request.width, request.height);

        match settings.background_style {
            BackgroundStyle::Solid => raster::fill_solid(&mut canvas, settings.background_color),
            BackgroundStyle::Gradient => raster::fill_gradient(
                &mut canvas,
                settings.background_gradient_start,
                settings.background_gradient_end,
                settings.background_gradient_angle,
            ),
        }

        let layout = self.layout(request);
        if layout.fallback {
            tracing::warn!(
                frame = %request.frame_name,
                "Frame asset not found, using fallback layout"
            );
        }

        let clip = layout.screen_clip(&self.calibration(settings.device_family));
        raster::draw_clipped_cover(&mut canvas, screenshot, &clip, self.filter);

        if let Some(frame) = self.assets.frames.get(&request.frame_name) {
            raster::draw_frame(&mut canvas, frame, &layout.device_frame, self.filter);
        }

        self.draw_text(&mut canvas, settings, &layout);

        tracing::debug!(
            width = request.width,
            height = request.height,
            scale = layout.scale_factor,
            frame = %request.frame_name,
            "Rendered composite"
        );
        Ok(canvas)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, settings: &ScreenshotItemSettings, layout: &Layout) {
        let fonts = &self.assets.fonts;

        if !settings.title_text.is_empty() {
            match fonts.title() {
                Some(font) => raster::draw_text_line(
                    canvas,
                    font,
                    layout.scaled_font_size(settings.title_font_size),
                    &settings.title_text,
                    &layout.title,
                    settings.text_color,
                ),
                None => tracing::debug!("No title font loaded, skipping title"),
            }
        }

        if !settings.subtitle_text.is_empty() {
            match fonts.subtitle() {
                Some(font) => raster::draw_text_line(
                    canvas,
                    font,
                    layout.scaled_font_size(settings.subtitle_font_size),
                    &settings.subtitle_text,
                    &layout.subtitle,
                    settings.text_color.with_alpha(SUBTITLE_OPACITY),
                ),
                None => tracing::debug!("No subtitle font loaded, skipping subtitle"),
            }
        }
    }
}

/// Parse a resampling filter name as used in configuration files.
pub fn parse_filter(name: &str) -> StoreshotResult<FilterType> {
    match name.to_ascii_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" | "bilinear" => Ok(FilterType::Triangle),
        "catmull-rom" | "catmullrom" | "bicubic" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Ok(FilterType::Lanczos3),
        other => Err(StoreshotError::config(format!(
            "Unknown resize filter: {other}. Use: nearest, triangle, catmull-rom, gaussian, lanczos3"
        ))),
    }
}
