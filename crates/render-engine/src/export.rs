//! Batch export: every item at every applicable catalog size, as PNG files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::ImageFormat;
use storeshot_common::error::{StoreshotError, StoreshotResult};
use storeshot_project_model::export_size::{sizes_for_export, ExportSize};
use storeshot_project_model::project::ScreenshotItem;

use crate::compositor::{CompositeRequest, Compositor};

/// An export job ready to run.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Items to export, in order. Each is rendered with its own settings.
    pub items: Vec<ScreenshotItem>,

    /// Folder that receives the files (or per-item subfolders).
    pub destination: PathBuf,
}

impl ExportJob {
    pub fn new(items: Vec<ScreenshotItem>, destination: impl Into<PathBuf>) -> Self {
        Self {
            items,
            destination: destination.into(),
        }
    }

    /// Number of files a fully successful run writes.
    pub fn planned_files(&self) -> usize {
        self.items
            .iter()
            .map(|item| sizes_for_export(item.settings.device_family).len())
            .sum()
    }
}

/// Progress callback for batch exports.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Files attempted so far, written or skipped.
    pub files_done: usize,

    /// Total files planned.
    pub total_files: usize,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of a batch export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Complete,
    Failed,
}

/// Outcome of a batch export that wrote at least one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Paths that were actually written, in export order.
    pub written: Vec<PathBuf>,

    /// Renders, folders, or writes that failed and were skipped.
    pub skipped: usize,
}

impl ExportSummary {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// Folder for the item at `index` out of `total`.
///
/// A single item goes straight into `destination`; several items each get
/// a `"Screenshot {n}"` subfolder, numbered from 1.
pub fn item_folder(destination: &Path, index: usize, total: usize) -> PathBuf {
    if total > 1 {
        destination.join(format!("Screenshot {}", index + 1))
    } else {
        destination.to_path_buf()
    }
}

/// Renders and writes batches of items.
#[derive(Debug, Clone)]
pub struct BatchExporter {
    compositor: Arc<Compositor>,
}

impl BatchExporter {
    pub fn new(compositor: Arc<Compositor>) -> Self {
        Self { compositor }
    }

    /// Render `item` at every export size for its device family into `folder`.
    ///
    /// Returns the written paths and the number of sizes skipped.
    pub fn export_item(&self, item: &ScreenshotItem, folder: &Path) -> (Vec<PathBuf>, usize) {
        let sizes = sizes_for_export(item.settings.device_family);
        let mut written = Vec::with_capacity(sizes.len());
        let mut skipped = 0;

        if let Err(e) = std::fs::create_dir_all(folder) {
            tracing::warn!(folder = %folder.display(), error = %e, "Failed to create export folder");
            return (written, sizes.len());
        }

        for size in &sizes {
            match self.export_size(item, size, folder) {
                Ok(path) => written.push(path),
                Err(e) => {
                    tracing::warn!(
                        item = %item.id,
                        size = size.display_name,
                        error = %e,
                        "Skipping export"
                    );
                    skipped += 1;
                }
            }
        }

        (written, skipped)
    }

    fn export_size(
        &self,
        item: &ScreenshotItem,
        size: &ExportSize,
        folder: &Path,
    ) -> StoreshotResult<PathBuf> {
        let image = self
            .compositor
            .render(&CompositeRequest::for_item(item, size))?;
        let path = folder.join(size.file_name());
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| StoreshotError::export(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Wrote export");
        Ok(path)
    }

    /// Export every item. Fails only when nothing at all was written.
    pub fn export_all(
        &self,
        items: &[ScreenshotItem],
        destination: &Path,
    ) -> StoreshotResult<ExportSummary> {
        self.export_all_with_progress(items, destination, None)
    }

    pub fn export_all_with_progress(
        &self,
        items: &[ScreenshotItem],
        destination: &Path,
        progress: Option<ProgressCallback>,
    ) -> StoreshotResult<ExportSummary> {
        let total_files: usize = items
            .iter()
            .map(|item| sizes_for_export(item.settings.device_family).len())
            .sum();
        let report = |files_done: usize, stage: ExportStage| {
            if let Some(cb) = &progress {
                cb(ExportProgress {
                    progress: if total_files == 0 {
                        1.0
                    } else {
                        files_done as f64 / total_files as f64
                    },
                    files_done,
                    total_files,
                    stage,
                });
            }
        };

        tracing::info!(
            destination = %destination.display(),
            items = items.len(),
            files = total_files,
            "Starting export"
        );
        report(0, ExportStage::Preparing);

        let mut summary = ExportSummary::default();
        for (index, item) in items.iter().enumerate() {
            let folder = item_folder(destination, index, items.len());
            let (written, skipped) = self.export_item(item, &folder);
            summary.written.extend(written);
            summary.skipped += skipped;
            report(summary.written.len() + summary.skipped, ExportStage::Rendering);
        }

        if summary.written.is_empty() {
            report(summary.skipped, ExportStage::Failed);
            return Err(StoreshotError::export(format!(
                "No files were written to {}",
                destination.display()
            )));
        }

        report(total_files, ExportStage::Complete);
        tracing::info!(
            written = summary.count(),
            skipped = summary.skipped,
            "Export finished"
        );
        Ok(summary)
    }
}

/// Shared "export in progress" flag.
#[derive(Debug, Clone, Default)]
pub struct ExportTracker {
    exporting: Arc<AtomicBool>,
}

impl ExportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Mark an export as started. `None` if one is already running.
    pub fn begin(&self) -> Option<ExportGuard> {
        self.exporting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ExportGuard {
                exporting: Arc::clone(&self.exporting),
            })
    }
}

/// Clears the tracker's flag when dropped.
#[derive(Debug)]
pub struct ExportGuard {
    exporting: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.exporting.store(false, Ordering::SeqCst);
    }
}

/// Run a batch export on the blocking pool.
///
/// This is the main entry point for exporting. The tracker reports
/// `is_exporting()` until the worker finishes, even if the returned future
/// is dropped first.
pub async fn export_project(
    compositor: Arc<Compositor>,
    job: ExportJob,
    tracker: &ExportTracker,
    progress: Option<ProgressCallback>,
) -> StoreshotResult<ExportSummary> {
    let guard = tracker
        .begin()
        .ok_or_else(|| StoreshotError::export("An export is already running"))?;

    if job.items.is_empty() {
        return Err(StoreshotError::export("No screenshots to export"));
    }

    let exporter = BatchExporter::new(compositor);
    tokio::task::spawn_blocking(move || {
        let _guard = guard;
        exporter.export_all_with_progress(&job.items, &job.destination, progress)
    })
    .await
    .map_err(|e| StoreshotError::export(format!("Export worker failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_folder_single_item_writes_directly() {
        let dest = Path::new("/tmp/out");
        assert_eq!(item_folder(dest, 0, 1), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_item_folder_numbers_from_one() {
        let dest = Path::new("/tmp/out");
        assert_eq!(item_folder(dest, 0, 3), PathBuf::from("/tmp/out/Screenshot 1"));
        assert_eq!(item_folder(dest, 2, 3), PathBuf::from("/tmp/out/Screenshot 3"));
    }

    #[test]
    fn test_tracker_guard_clears_flag() {
        let tracker = ExportTracker::new();
        assert!(!tracker.is_exporting());
        {
            let _guard = tracker.begin().unwrap();
            assert!(tracker.is_exporting());
            assert!(tracker.begin().is_none());
        }
        assert!(!tracker.is_exporting());
        assert!(tracker.begin().is_some());
    }

    #[test]
    fn test_planned_files_counts_portrait_sizes() {
        let items = vec![
            ScreenshotItem::new(image::RgbaImage::new(2, 4)),
            ScreenshotItem::new(image::RgbaImage::new(2, 4)),
        ];
        assert_eq!(ExportJob::new(items, "/tmp/out").planned_files(), 4);
    }
}
