use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use storeshot_project_model::export_size::all_sizes;
use storeshot_project_model::project::{ScreenshotItem, ScreenshotProject};
use storeshot_project_model::settings::{DeviceFamily, Orientation, ScreenshotItemSettings};
use storeshot_render_engine::{
    export_project, AssetStore, BatchExporter, CompositeRequest, Compositor, ExportJob,
    ExportProgress, ExportStage, ExportTracker, FontSet, FrameAssets, ProgressCallback,
};

/// A bezel-like frame: opaque border, transparent screen.
fn synthetic_frame(w: u32, h: u32) -> RgbaImage {
    let border = w / 20;
    RgbaImage::from_fn(w, h, |x, y| {
        let inside = x >= border && x < w - border && y >= border && y < h - border;
        if inside {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([20, 20, 20, 255])
        }
    })
}

fn compositor_with_frames() -> Arc<Compositor> {
    let mut frames = FrameAssets::new();
    for family in DeviceFamily::ALL {
        frames.insert(
            family.frame_asset_name(Orientation::Portrait),
            synthetic_frame(120, 260),
        );
    }
    Arc::new(
        Compositor::new(Arc::new(AssetStore::new(frames, FontSet::new())))
            .with_filter(FilterType::Nearest),
    )
}

fn item(family: DeviceFamily) -> ScreenshotItem {
    ScreenshotItem::with_settings(
        RgbaImage::from_pixel(24, 48, Rgba([200, 40, 40, 255])),
        ScreenshotItemSettings {
            device_family: family,
            ..ScreenshotItemSettings::default()
        },
    )
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_render_matches_every_catalog_size() {
    let compositor = compositor_with_frames();
    let shot = item(DeviceFamily::Phone);

    for size in all_sizes() {
        let mut request = CompositeRequest::for_item(&shot, size);
        request.settings.device_family = size.device_family;
        let image = compositor.render(&request).unwrap();
        assert_eq!(image.dimensions(), (size.width, size.height), "{size:?}");
    }
}

#[test]
fn test_single_item_writes_directly_into_destination() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BatchExporter::new(compositor_with_frames());

    let summary = exporter
        .export_all(&[item(DeviceFamily::Phone)], dir.path())
        .unwrap();

    assert_eq!(summary.count(), 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(
        files_in(dir.path()),
        vec![
            "phone_1242x2688_portrait.png".to_string(),
            "phone_1284x2778_portrait.png".to_string(),
        ]
    );
    assert!(summary.written.iter().all(|p| p.parent() == Some(dir.path())));

    let written = image::open(dir.path().join("phone_1284x2778_portrait.png")).unwrap();
    assert_eq!((written.width(), written.height()), (1284, 2778));
}

#[test]
fn test_multiple_items_get_numbered_subfolders() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BatchExporter::new(compositor_with_frames());
    let items = [
        item(DeviceFamily::Phone),
        item(DeviceFamily::Tablet),
        item(DeviceFamily::Phone),
    ];

    let summary = exporter.export_all(&items, dir.path()).unwrap();

    assert_eq!(summary.count(), 6);
    assert!(files_in(dir.path()).is_empty());
    assert_eq!(
        files_in(&dir.path().join("Screenshot 2")),
        vec![
            "tablet_2048x2732_portrait.png".to_string(),
            "tablet_2064x2752_portrait.png".to_string(),
        ]
    );
    assert_eq!(files_in(&dir.path().join("Screenshot 1")).len(), 2);
    assert_eq!(files_in(&dir.path().join("Screenshot 3")).len(), 2);
}

#[test]
fn test_unwritable_destination_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "a file where a folder should be").unwrap();

    let exporter = BatchExporter::new(compositor_with_frames());
    let err = exporter
        .export_all(&[item(DeviceFamily::Phone)], &blocker)
        .unwrap_err();
    assert!(err.to_string().contains("No files were written"));
}

#[test]
fn test_partial_failure_keeps_successful_items() {
    let dir = tempfile::tempdir().unwrap();
    // A file named like the second item's folder blocks only that item.
    std::fs::write(dir.path().join("Screenshot 2"), "blocked").unwrap();

    let exporter = BatchExporter::new(compositor_with_frames());
    let summary = exporter
        .export_all(&[item(DeviceFamily::Phone), item(DeviceFamily::Phone)], dir.path())
        .unwrap();

    assert_eq!(summary.count(), 2);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_empty_batch_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BatchExporter::new(compositor_with_frames());
    assert!(exporter.export_all(&[], dir.path()).is_err());
}

#[test]
fn test_progress_reports_terminal_stage() {
    let dir = tempfile::tempdir().unwrap();
    let stages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&stages);

    BatchExporter::new(compositor_with_frames())
        .export_all_with_progress(
            &[item(DeviceFamily::Phone)],
            dir.path(),
            Some(Box::new(move |p: ExportProgress| sink.lock().unwrap().push((p.stage, p.progress)))),
        )
        .unwrap();

    let stages = stages.lock().unwrap();
    assert_eq!(stages.first().map(|s| s.0), Some(ExportStage::Preparing));
    assert_eq!(stages.last().copied(), Some((ExportStage::Complete, 1.0)));
}

#[tokio::test]
async fn test_export_project_runs_in_background_and_clears_flag() {
    let dir = tempfile::tempdir().unwrap();
    let mut project = ScreenshotProject::new();
    project.add_images([RgbaImage::from_pixel(24, 48, Rgba([0, 0, 255, 255]))]);

    let tracker = ExportTracker::new();
    let job = ExportJob::new(project.items().to_vec(), dir.path());
    let summary = export_project(compositor_with_frames(), job, &tracker, None)
        .await
        .unwrap();

    assert_eq!(summary.count(), 2);
    assert!(!tracker.is_exporting());
}

#[tokio::test]
async fn test_export_project_rejects_concurrent_run() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = ExportTracker::new();
    let _running = tracker.begin().unwrap();

    let job = ExportJob::new(vec![item(DeviceFamily::Phone)], dir.path());
    let err = export_project(compositor_with_frames(), job, &tracker, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already running"));
    assert!(tracker.is_exporting());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dropped_export_future_keeps_flag_until_worker_finishes() {
    let dir = tempfile::tempdir().unwrap();
    let (release, gate) = mpsc::channel::<()>();
    let progress: ProgressCallback = Box::new(move |p: ExportProgress| {
        if p.stage == ExportStage::Preparing {
            let _ = gate.recv();
        }
    });

    let tracker = ExportTracker::new();
    let job = ExportJob::new(vec![item(DeviceFamily::Phone)], dir.path());
    let pending = export_project(compositor_with_frames(), job, &tracker, Some(progress));
    assert!(tokio::time::timeout(Duration::from_millis(50), pending)
        .await
        .is_err());

    // The worker is parked on the gate; the future is gone.
    assert!(tracker.is_exporting());
    assert!(tracker.begin().is_none());

    release.send(()).unwrap();
    let deadline = Instant::now() + Duration::from_secs(60);
    while tracker.is_exporting() {
        assert!(Instant::now() < deadline, "export worker never finished");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(files_in(dir.path()).len(), 2);
    assert!(tracker.begin().is_some());
}
