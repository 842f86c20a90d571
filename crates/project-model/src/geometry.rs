//! Rectangle and vector math shared by layout and rasterization.
//!
//! All pixel-space rectangles use a top-left origin with `y` growing
//! downward, matching the raster buffers they are drawn into.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle anchored at the origin.
    pub fn from_size(w: f64, h: f64) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// The center point of this rectangle.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.mid_x(), self.mid_y())
    }

    /// Width divided by height. Degenerate rectangles report `1.0`.
    pub fn aspect_ratio(&self) -> f64 {
        if self.h.abs() < f64::EPSILON {
            1.0
        } else {
            self.w / self.h
        }
    }

    /// Shrink by `dx` on the left and right, `dy` on the top and bottom.
    /// Negative values grow the rectangle.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            w: (self.w - 2.0 * dx).max(0.0),
            h: (self.h - 2.0 * dy).max(0.0),
        }
    }

    /// Translate vertically.
    pub fn offset_y(&self, dy: f64) -> Rect {
        Rect {
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether `other` lies within this rectangle, allowing `tolerance`
    /// of floating-point slack on every edge.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.min_x() >= self.min_x() - tolerance
            && other.min_y() >= self.min_y() - tolerance
            && other.max_x() <= self.max_x() + tolerance
            && other.max_y() <= self.max_y() + tolerance
    }

    /// Check if a point is within this rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.min_x() && px <= self.max_x() && py >= self.min_y() && py <= self.max_y()
    }
}

/// A 2D point in canvas pixels (or unit-square coordinates for previews).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Direction of a gradient angle given in degrees: `(cos θ, sin θ)`.
pub fn unit_vector(angle_degrees: f64) -> (f64, f64) {
    let radians = angle_degrees.to_radians();
    (radians.cos(), radians.sin())
}

/// Gradient endpoints in unit-square coordinates, as used by live previews.
pub fn gradient_unit_points(angle_degrees: f64) -> (Point2D, Point2D) {
    let (dx, dy) = unit_vector(angle_degrees);
    (
        Point2D::new(0.5 - dx * 0.5, 0.5 - dy * 0.5),
        Point2D::new(0.5 + dx * 0.5, 0.5 + dy * 0.5),
    )
}

/// Gradient endpoints in pixel space for `rect`.
///
/// The endpoints sit on the line through the rectangle's center, half a
/// diagonal away on either side, so the ramp spans the whole fill for any
/// angle. The direction agrees with [`gradient_unit_points`].
pub fn gradient_points(angle_degrees: f64, rect: &Rect) -> (Point2D, Point2D) {
    let (dx, dy) = unit_vector(angle_degrees);
    let center = rect.center();
    let half_diagonal = 0.5 * (rect.w * rect.w + rect.h * rect.h).sqrt();
    (
        Point2D::new(center.x - dx * half_diagonal, center.y - dy * half_diagonal),
        Point2D::new(center.x + dx * half_diagonal, center.y + dy * half_diagonal),
    )
}

/// The largest rectangle with `content_aspect` that fits centered in `container`.
///
/// Content relatively wider than the container is fitted to the container's
/// width and centered vertically; otherwise it is fitted to the height and
/// centered horizontally.
pub fn fit_rect(content_aspect: f64, container: &Rect) -> Rect {
    if content_aspect <= 0.0 || !content_aspect.is_finite() {
        return Rect::new(container.mid_x(), container.mid_y(), 0.0, 0.0);
    }

    if content_aspect > container.aspect_ratio() {
        let w = container.w;
        let h = w / content_aspect;
        Rect::new(container.x, container.mid_y() - h / 2.0, w, h)
    } else {
        let h = container.h;
        let w = h * content_aspect;
        Rect::new(container.mid_x() - w / 2.0, container.y, w, h)
    }
}

/// The smallest rectangle with `content_aspect` that covers `container`,
/// centered on it. Overflow falls on the longer axis and is cropped by the caller.
pub fn cover_rect(content_aspect: f64, container: &Rect) -> Rect {
    if content_aspect <= 0.0 || !content_aspect.is_finite() {
        return *container;
    }

    if content_aspect > container.aspect_ratio() {
        let h = container.h;
        let w = h * content_aspect;
        Rect::new(container.mid_x() - w / 2.0, container.y, w, h)
    } else {
        let w = container.w;
        let h = w / content_aspect;
        Rect::new(container.x, container.mid_y() - h / 2.0, w, h)
    }
}

/// A rectangle with uniformly rounded corners, used as a clip shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f64,
}

impl RoundedRect {
    /// Create a rounded rectangle; the radius is clamped to half the shorter side.
    pub fn new(rect: Rect, radius: f64) -> Self {
        let max_radius = (rect.w.min(rect.h) / 2.0).max(0.0);
        Self {
            rect,
            radius: radius.clamp(0.0, max_radius),
        }
    }

    /// Signed distance from `(px, py)` to the outline; negative inside.
    pub fn signed_distance(&self, px: f64, py: f64) -> f64 {
        let half_w = self.rect.w / 2.0;
        let half_h = self.rect.h / 2.0;
        let qx = (px - self.rect.mid_x()).abs() - (half_w - self.radius);
        let qy = (py - self.rect.mid_y()).abs() - (half_h - self.radius);
        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        let inside = qx.max(qy).min(0.0);
        outside + inside - self.radius
    }

    /// Anti-aliased coverage of the pixel whose center is `(px, py)`, in `[0, 1]`.
    pub fn coverage(&self, px: f64, py: f64) -> f64 {
        (0.5 - self.signed_distance(px, py)).clamp(0.0, 1.0)
    }
}
