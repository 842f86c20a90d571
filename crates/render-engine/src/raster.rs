//! Pixel-level drawing into RGBA canvases.
//!
//! Coverage values (clip masks, glyph coverage) are in `[0, 1]` and
//! multiply the source alpha before blending.

use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::pixelops::interpolate;
use imageproc::rect::Rect as PixelRect;
use rusttype::{point, Font, Scale};
use storeshot_project_model::color::RgbaColor;
use storeshot_project_model::geometry::{cover_rect, gradient_points, Rect};

use crate::layout::ScreenClip;

/// Replace every pixel with `color`.
pub fn fill_solid(canvas: &mut RgbaImage, color: RgbaColor) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    draw_filled_rect_mut(canvas, PixelRect::at(0, 0).of_size(w, h), Rgba(color.to_rgba8()));
}

/// Replace every pixel with a linear gradient from `start` to `end` along
/// `angle_degrees`. Pixels beyond either endpoint take the endpoint color.
pub fn fill_gradient(canvas: &mut RgbaImage, start: RgbaColor, end: RgbaColor, angle_degrees: f64) {
    let (w, h) = canvas.dimensions();
    let (p0, p1) = gradient_points(angle_degrees, &Rect::from_size(w as f64, h as f64));
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    let length_sq = dx * dx + dy * dy;

    let start = Rgba(start.to_rgba8());
    let end = Rgba(end.to_rgba8());

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let t = if length_sq > 0.0 {
            let px = x as f64 + 0.5 - p0.x;
            let py = y as f64 + 0.5 - p0.y;
            ((px * dx + py * dy) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        *pixel = interpolate(start, end, (1.0 - t) as f32);
    }
}

/// Source-over blend `color` onto one pixel, scaled by `coverage`.
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f64) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = (color[3] as f64 * coverage.clamp(0.0, 1.0)).round() as u8;
    if alpha == 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let mut dst = *canvas.get_pixel(x, y);
    dst.blend(&Rgba([color[0], color[1], color[2], alpha]));
    canvas.put_pixel(x, y, dst);
}

/// Pixel bounds of `rect` clamped to the canvas, as `(x0, y0, x1, y1)` half-open.
fn pixel_span(canvas: &RgbaImage, rect: &Rect) -> (u32, u32, u32, u32) {
    let clamp_x = |v: f64| v.clamp(0.0, canvas.width() as f64) as u32;
    let clamp_y = |v: f64| v.clamp(0.0, canvas.height() as f64) as u32;
    (
        clamp_x(rect.min_x().floor()),
        clamp_y(rect.min_y().floor()),
        clamp_x(rect.max_x().ceil()),
        clamp_y(rect.max_y().ceil()),
    )
}

/// Draw `source` scaled to cover the clip's screen rect, center-cropping the
/// overflow, masked by both the outer silhouette and the rounded screen.
pub fn draw_clipped_cover(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    clip: &ScreenClip,
    filter: FilterType,
) {
    let target = clip.inner.rect;
    if source.width() == 0 || source.height() == 0 || target.w < 1.0 || target.h < 1.0 {
        return;
    }

    let aspect = source.width() as f64 / source.height() as f64;
    let cover = cover_rect(aspect, &target);
    let scaled_w = (cover.w.round() as u32).max(1);
    let scaled_h = (cover.h.round() as u32).max(1);
    let scaled = imageops::resize(source, scaled_w, scaled_h, filter);

    let (x0, y0, x1, y1) = pixel_span(canvas, &target);
    for y in y0..y1 {
        let cy = y as f64 + 0.5;
        let sy = ((cy - cover.y).floor() as i64).clamp(0, scaled_h as i64 - 1) as u32;
        for x in x0..x1 {
            let cx = x as f64 + 0.5;
            let coverage = clip.outer.coverage(cx, cy) * clip.inner.coverage(cx, cy);
            if coverage <= 0.0 {
                continue;
            }
            let sx = ((cx - cover.x).floor() as i64).clamp(0, scaled_w as i64 - 1) as u32;
            blend_pixel(canvas, x as i64, y as i64, *scaled.get_pixel(sx, sy), coverage);
        }
    }
}

/// Resize `frame` to `rect` and composite it on top, unclipped.
pub fn draw_frame(canvas: &mut RgbaImage, frame: &RgbaImage, rect: &Rect, filter: FilterType) {
    let w = rect.w.round() as u32;
    let h = rect.h.round() as u32;
    if w == 0 || h == 0 {
        return;
    }
    let scaled = imageops::resize(frame, w, h, filter);
    imageops::overlay(canvas, &scaled, rect.x.round() as i64, rect.y.round() as i64);
}

/// Advance width of `text` at `size` pixels.
pub fn measure_text(font: &Font<'_>, size: f64, text: &str) -> f64 {
    let scale = Scale::uniform(size as f32);
    font.layout(text, scale, point(0.0, 0.0))
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .fold(0.0f32, f32::max) as f64
}

/// Draw a single line of text horizontally centered in `rect`, with its
/// descenders resting on the rect's lower edge.
pub fn draw_text_line(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    size: f64,
    text: &str,
    rect: &Rect,
    color: RgbaColor,
) {
    if text.is_empty() || size <= 0.0 {
        return;
    }

    let scale = Scale::uniform(size as f32);
    let v_metrics = font.v_metrics(scale);
    let width = measure_text(font, size, text);
    let origin_x = rect.mid_x() - width / 2.0;
    let baseline = rect.max_y() + v_metrics.descent as f64;
    let rgba = Rgba(color.to_rgba8());

    for glyph in font.layout(text, scale, point(origin_x as f32, baseline as f32)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x as i64 + gx as i64;
            let y = bb.min.y as i64 + gy as i64;
            blend_pixel(canvas, x, y, rgba, coverage as f64);
        });
    }
}
