//! Storeshot Render Engine
//!
//! Turns a screenshot plus its settings into a finished App Store image,
//! and batch-exports whole projects as PNG files.
//!
//! # Pipeline Architecture
//!
//! ```text
//! background (solid | gradient)
//!        │
//!        ├── layout (frame rect, screen rect, text rects, scale)
//!        │
//!        ├── screenshot, cover-cropped into the rounded screen clip
//!        │
//!        ├── device frame bitmap, unclipped
//!        │
//!        ├── title (bold) ── subtitle (medium, 80% opacity)
//!        ▼
//!   RgbaImage ── PNG ── {family}_{w}x{h}_{orientation}.png
//! ```

pub mod assets;
pub mod compositor;
pub mod export;
pub mod layout;
pub mod raster;

pub use assets::{AssetStore, FontSet, FrameAssets};
pub use compositor::{parse_filter, CompositeRequest, Compositor};
pub use export::*;
pub use layout::{compute_layout, FrameCalibration, Layout, LayoutInput, ScreenClip};
