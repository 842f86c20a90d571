//! Frame bitmaps and fonts used by the compositor.
//!
//! Frames are opaque, pre-made PNG resources looked up by asset key
//! (`"{model} - {colorway} - {Portrait|Landscape}"`). A lookup miss is not an
//! error; the compositor falls back to placeholder geometry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use rusttype::Font;
use storeshot_common::config::AssetConfig;
use storeshot_common::error::{StoreshotError, StoreshotResult};

/// Frame bitmaps keyed by asset name.
#[derive(Debug, Clone, Default)]
pub struct FrameAssets {
    frames: HashMap<String, Arc<RgbaImage>>,
}

impl FrameAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.png` in `dir`, keyed by file stem.
    ///
    /// A missing directory yields an empty table. Files that fail to decode
    /// are skipped with a warning.
    pub fn load_dir(dir: &Path) -> StoreshotResult<Self> {
        let mut assets = Self::new();
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Frame asset directory not found");
            return Ok(assets);
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match image::open(&path) {
                Ok(img) => {
                    assets.insert(name, img.into_rgba8());
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable frame asset");
                }
            }
        }

        tracing::debug!(dir = %dir.display(), count = assets.len(), "Loaded frame assets");
        Ok(assets)
    }

    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.frames.insert(name.into(), Arc::new(image));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RgbaImage>> {
        self.frames.get(name)
    }

    /// Native pixel size of a frame, if present.
    pub fn native_size(&self, name: &str) -> Option<(u32, u32)> {
        self.get(name).map(|img| img.dimensions())
    }

    /// Asset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.frames.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Title (bold) and subtitle (medium) faces.
///
/// Either face stands in for the other when only one is configured.
#[derive(Clone, Default)]
pub struct FontSet {
    title: Option<Font<'static>>,
    subtitle: Option<Font<'static>>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("title", &self.title.is_some())
            .field("subtitle", &self.subtitle.is_some())
            .finish()
    }
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw font file bytes.
    pub fn from_bytes(title: Option<Vec<u8>>, subtitle: Option<Vec<u8>>) -> StoreshotResult<Self> {
        let parse = |bytes: Vec<u8>, role: &str| {
            Font::try_from_vec(bytes)
                .ok_or_else(|| StoreshotError::asset(format!("Invalid {role} font data")))
        };
        Ok(Self {
            title: title.map(|b| parse(b, "title")).transpose()?,
            subtitle: subtitle.map(|b| parse(b, "subtitle")).transpose()?,
        })
    }

    /// Load fonts from disk.
    pub fn load(title: Option<&Path>, subtitle: Option<&Path>) -> StoreshotResult<Self> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    StoreshotError::FileNotFound {
                        path: path.to_path_buf(),
                    }
                } else {
                    StoreshotError::Io(e)
                }
            })
        };
        Self::from_bytes(title.map(read).transpose()?, subtitle.map(read).transpose()?)
    }

    pub fn title(&self) -> Option<&Font<'static>> {
        self.title.as_ref().or(self.subtitle.as_ref())
    }

    pub fn subtitle(&self) -> Option<&Font<'static>> {
        self.subtitle.as_ref().or(self.title.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none()
    }
}

/// Everything the compositor reads besides the request itself.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    pub frames: FrameAssets,
    pub fonts: FontSet,
}

impl AssetStore {
    pub fn new(frames: FrameAssets, fonts: FontSet) -> Self {
        Self { frames, fonts }
    }

    /// Load frames and fonts from configured locations.
    ///
    /// Missing or broken fonts are logged and left out; text is then skipped
    /// at render time instead of failing the render.
    pub fn from_config(config: &AssetConfig) -> StoreshotResult<Self> {
        let frames = FrameAssets::load_dir(&config.frames_dir)?;

        let load_one = |path: Option<&Path>, role: &str| -> Option<Vec<u8>> {
            let path = path?;
            match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, role, "Failed to read font");
                    None
                }
            }
        };
        let title = load_one(config.title_font.as_deref(), "title");
        let subtitle = load_one(config.subtitle_font.as_deref(), "subtitle");

        let fonts = match FontSet::from_bytes(title, subtitle) {
            Ok(fonts) => fonts,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring configured fonts");
                FontSet::new()
            }
        };
        if fonts.is_empty() {
            tracing::warn!("No fonts configured; title and subtitle text will not be drawn");
        }

        Ok(Self { frames, fonts })
    }
}
