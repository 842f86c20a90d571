//! Storeshot Project Model
//!
//! Defines the core data contracts for Storeshot projects:
//! - **Geometry:** rectangles, gradient vectors, fit/cover math
//! - **Settings:** per-screenshot text, color, and background choices
//! - **Export sizes:** the catalog of App Store target resolutions
//! - **Project:** ordered screenshot items and the settings interchange format
//!
//! Pixel-space rectangles use a top-left origin throughout.

pub mod color;
pub mod export_size;
pub mod geometry;
pub mod project;
pub mod settings;

pub use color::*;
pub use export_size::{all_sizes, sizes_for_export, ExportSize};
pub use geometry::*;
pub use project::*;
pub use settings::*;
