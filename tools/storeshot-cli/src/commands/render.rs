//! Render a single composite image.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use image::ImageFormat;
use storeshot_common::config::AppConfig;
use storeshot_project_model::settings::{DeviceFamily, ScreenshotItemSettings};
use storeshot_render_engine::CompositeRequest;

use super::{load_compositor, load_image, load_settings};

pub fn run(
    config: &AppConfig,
    image: PathBuf,
    output: PathBuf,
    width: u32,
    height: u32,
    settings_path: Option<PathBuf>,
    family: Option<DeviceFamily>,
) -> anyhow::Result<()> {
    let mut settings = match &settings_path {
        Some(path) => load_settings(path)?,
        None => ScreenshotItemSettings::default(),
    };
    if let Some(family) = family {
        settings.device_family = family;
    }

    let screenshot = load_image(&image)?;
    let compositor = load_compositor(config)?;
    let request = CompositeRequest::new(Some(Arc::new(screenshot)), settings, width, height);

    println!("Rendering {} at {width}x{height}", image.display());
    println!("  Frame: {}", request.frame_name);

    let rendered = compositor.render(&request)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    rendered
        .save_with_format(&output, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}
