//! Print the computed layout for a canvas.

use storeshot_common::config::AppConfig;
use storeshot_project_model::geometry::Rect;
use storeshot_project_model::settings::{
    DeviceFamily, Orientation, ScreenshotItemSettings, TextPosition,
};
use storeshot_render_engine::{compute_layout, FrameAssets, FrameCalibration, LayoutInput};

pub struct LayoutArgs {
    pub family: DeviceFamily,
    pub width: u32,
    pub height: u32,
    pub frame_size: Option<(u32, u32)>,
    pub position: TextPosition,
    pub offset: f64,
    pub json: bool,
}

pub fn run(config: &AppConfig, args: LayoutArgs) -> anyhow::Result<()> {
    let frame_name = args
        .family
        .frame_asset_name(Orientation::of(args.width, args.height));

    let frame_size = match args.frame_size {
        Some(size) => Some(size),
        None => FrameAssets::load_dir(&config.assets.frames_dir)?.native_size(&frame_name),
    };

    let defaults = ScreenshotItemSettings::default();
    let calibration = FrameCalibration::for_family(args.family);
    let layout = compute_layout(&LayoutInput {
        canvas_width: args.width as f64,
        canvas_height: args.height as f64,
        frame_size,
        text_position: args.position,
        title_font_size: defaults.title_font_size,
        subtitle_font_size: defaults.subtitle_font_size,
        y_offset: args.offset,
        calibration,
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let clip = layout.screen_clip(&calibration);
    println!("Layout for {}x{} ({})", args.width, args.height, frame_name);
    match frame_size {
        Some((w, h)) => println!("  Frame native size: {w}x{h}"),
        None => println!("  Frame native size: unknown (fallback layout)"),
    }
    println!("  Scale factor:  {:.4}", layout.scale_factor);
    println!("  Text area:     {:.1}px", layout.text_area_height);
    print_rect("Device frame", &layout.device_frame);
    print_rect("Screenshot", &layout.screenshot);
    print_rect("Title", &layout.title);
    print_rect("Subtitle", &layout.subtitle);
    println!(
        "  Clip radii:    outer {:.1}px, inner {:.1}px",
        clip.outer.radius, clip.inner.radius
    );

    Ok(())
}

fn print_rect(label: &str, rect: &Rect) {
    println!(
        "  {:<14} x={:.1} y={:.1} w={:.1} h={:.1}",
        format!("{label}:"),
        rect.x,
        rect.y,
        rect.w,
        rect.h
    );
}
