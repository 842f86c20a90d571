//! Write a default settings configuration file.

use std::path::PathBuf;

use image::RgbaImage;
use storeshot_project_model::project::{ScreenshotProject, MAX_ITEMS};
use storeshot_project_model::settings::DeviceFamily;

pub fn run(path: PathBuf, count: usize, family: DeviceFamily, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    if count == 0 || count > MAX_ITEMS {
        return Err(anyhow::anyhow!("--count must be between 1 and {MAX_ITEMS}"));
    }

    // Settings files carry no pixels; placeholders just give each entry an id.
    let mut project = ScreenshotProject::new();
    project.add_images((0..count).map(|_| RgbaImage::new(1, 1)));
    for index in 0..count {
        project.select(index);
        project.editing_mut().device_family = family;
    }

    project
        .save_configuration(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write configuration: {e}"))?;

    let noun = if count == 1 { "entry" } else { "entries" };
    println!("Created {} with {count} screenshot {noun}", path.display());
    println!("Edit titles, colors and layout there, then run:");
    println!("  storeshot export <IMAGES...> --config {}", path.display());
    Ok(())
}
