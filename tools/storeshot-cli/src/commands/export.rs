//! Batch-export screenshots at every App Store size.

use std::io::Write;
use std::path::PathBuf;

use storeshot_common::config::AppConfig;
use storeshot_project_model::project::{ScreenshotProject, MAX_ITEMS};
use storeshot_render_engine::export::{export_project, ExportJob, ExportProgress, ExportTracker};

use super::{load_compositor, load_image};

pub async fn run(
    config: &AppConfig,
    images: Vec<PathBuf>,
    output: Option<PathBuf>,
    settings_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    if images.len() > MAX_ITEMS {
        println!(
            "Only the first {MAX_ITEMS} of {} images will be exported.",
            images.len()
        );
    }

    let mut project = ScreenshotProject::new();
    let decoded = images
        .iter()
        .take(MAX_ITEMS)
        .map(|path| load_image(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    project.add_images(decoded);

    if let Some(path) = &settings_path {
        let applied = project
            .load_configuration(path)
            .map_err(|e| anyhow::anyhow!("Failed to apply settings: {e}"))?;
        println!("Applied settings to {applied} screenshot(s) from {}", path.display());
    }

    let destination = output.unwrap_or_else(|| config.export.output_dir.clone());
    let job = ExportJob::new(project.items().to_vec(), &destination);

    println!("Exporting {} screenshot(s) to {}", job.items.len(), destination.display());
    println!("  Files planned: {}", job.planned_files());

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        print!(
            "\r  Progress: {:.0}% ({}/{} files)  ",
            p.progress * 100.0,
            p.files_done,
            p.total_files,
        );
        std::io::stdout().flush().ok();
    });

    let compositor = load_compositor(config)?;
    let tracker = ExportTracker::new();
    match export_project(compositor, job, &tracker, Some(progress_cb)).await {
        Ok(summary) => {
            println!("\nExport complete: {} file(s)", summary.count());
            for path in &summary.written {
                println!("  {}", path.display());
            }
            if summary.skipped > 0 {
                println!("  Skipped: {} (see log for details)", summary.skipped);
            }
            Ok(())
        }
        Err(e) => {
            println!("\nExport failed: {e}");
            Err(e.into())
        }
    }
}
