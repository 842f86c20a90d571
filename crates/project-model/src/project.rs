//! Screenshot project: ordered items, the live editing snapshot, and the
//! JSON interchange format used to save and restore settings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::ScreenshotItemSettings;

/// Maximum number of screenshots a project holds.
pub const MAX_ITEMS: usize = 5;

/// One imported screenshot together with its own settings.
#[derive(Debug, Clone)]
pub struct ScreenshotItem {
    /// Stable identity for the lifetime of the item.
    pub id: Uuid,

    /// Decoded screenshot pixels. Shared so render snapshots stay cheap.
    pub image: Arc<RgbaImage>,

    /// Settings owned by this item.
    pub settings: ScreenshotItemSettings,
}

impl ScreenshotItem {
    /// A new item with default settings.
    pub fn new(image: RgbaImage) -> Self {
        Self::with_settings(image, ScreenshotItemSettings::default())
    }

    pub fn with_settings(image: RgbaImage, settings: ScreenshotItemSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            image: Arc::new(image),
            settings,
        }
    }
}

/// An ordered collection of screenshots plus the settings currently being edited.
///
/// The editing snapshot mirrors the selected item's settings. Selecting
/// another item first writes the snapshot back, then loads the new item's
/// settings into it.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotProject {
    items: Vec<ScreenshotItem>,
    selected: usize,
    editing: ScreenshotItemSettings,
}

impl ScreenshotProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ScreenshotItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&ScreenshotItem> {
        if self.items.is_empty() {
            return None;
        }
        self.items.get(self.selected.min(self.items.len() - 1))
    }

    /// Settings currently being edited.
    pub fn editing(&self) -> &ScreenshotItemSettings {
        &self.editing
    }

    pub fn editing_mut(&mut self) -> &mut ScreenshotItemSettings {
        &mut self.editing
    }

    /// Write the editing snapshot into the selected item.
    pub fn commit_editing(&mut self) {
        if let Some(item) = self.items.get_mut(self.selected) {
            item.settings = self.editing.clone();
        }
    }

    fn load_editing(&mut self) {
        if let Some(item) = self.items.get(self.selected) {
            self.editing = item.settings.clone();
        }
    }

    /// Change the selection, keeping the edits made to the previous item.
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.commit_editing();
        self.selected = index;
        self.load_editing();
    }

    /// Append images with default settings until [`MAX_ITEMS`] is reached and
    /// select the last one. Returns how many were added.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = RgbaImage>) -> usize {
        self.commit_editing();

        let mut added = 0;
        for image in images {
            if self.items.len() >= MAX_ITEMS {
                break;
            }
            self.items.push(ScreenshotItem::new(image));
            added += 1;
        }

        if added > 0 {
            self.selected = self.items.len() - 1;
            self.load_editing();
        }
        added
    }

    /// Remove the item at `index`, keeping the selection on the same item
    /// when possible.
    pub fn remove_item(&mut self, index: usize) -> Option<ScreenshotItem> {
        if index >= self.items.len() {
            return None;
        }
        self.commit_editing();
        let removed = self.items.remove(index);

        if self.items.is_empty() {
            self.selected = 0;
        } else if index < self.selected {
            self.selected -= 1;
        } else if self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
        self.load_editing();
        Some(removed)
    }

    /// Drop every item. The editing snapshot is left as is.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = 0;
    }

    /// Drop every item and restore default editing settings.
    pub fn reset(&mut self) {
        self.clear();
        self.editing = ScreenshotItemSettings::default();
    }

    /// Snapshot every item's settings (committing pending edits first).
    pub fn export_configuration(&mut self) -> ProjectConfiguration {
        self.commit_editing();

        let screenshots = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| ScreenshotConfiguration {
                id: item.id.to_string(),
                image_name: format!("screenshot_{}.png", index + 1),
                settings: item.settings.clone(),
            })
            .collect();

        ProjectConfiguration {
            screenshots,
            export_date: Some(Utc::now()),
        }
    }

    /// Serialize the configuration as key-sorted, pretty-printed JSON.
    pub fn export_configuration_json(&mut self) -> Result<String, ProjectError> {
        self.export_configuration().to_json()
    }

    /// Apply a parsed configuration.
    ///
    /// Entries whose id matches an existing item update that item. The
    /// remaining entries are applied by position, but only to items no id
    /// match has claimed. Entries with nowhere to go are ignored. Returns the
    /// number of items updated.
    pub fn import_configuration(&mut self, config: &ProjectConfiguration) -> usize {
        let mut claimed: Vec<Option<usize>> = vec![None; self.items.len()];
        let mut unmatched = Vec::new();

        for (index, entry) in config.screenshots.iter().enumerate() {
            let by_id = Uuid::parse_str(&entry.id)
                .ok()
                .and_then(|id| self.items.iter().position(|item| item.id == id))
                .filter(|&target| claimed[target].is_none());
            match by_id {
                Some(target) => claimed[target] = Some(index),
                None => unmatched.push(index),
            }
        }

        for index in unmatched {
            if claimed.get(index) == Some(&None) {
                claimed[index] = Some(index);
            }
        }

        for (target, entry) in claimed.iter().enumerate() {
            if let Some(entry) = entry {
                self.items[target].settings = config.screenshots[*entry].settings.clone();
            }
        }

        self.load_editing();
        claimed.iter().filter(|c| c.is_some()).count()
    }

    /// Parse and apply a JSON configuration.
    ///
    /// The whole payload is parsed before anything is applied, so a
    /// malformed payload leaves the project untouched.
    pub fn import_configuration_json(&mut self, json: &str) -> Result<usize, ProjectError> {
        let config = ProjectConfiguration::from_json(json)?;
        Ok(self.import_configuration(&config))
    }

    pub fn save_configuration(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.export_configuration().save(path)
    }

    /// Load a configuration file and apply it. Nothing changes on error.
    pub fn load_configuration(&mut self, path: &Path) -> Result<usize, ProjectError> {
        let config = ProjectConfiguration::load(path)?;
        Ok(self.import_configuration(&config))
    }
}

/// Serialized project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub screenshots: Vec<ScreenshotConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

/// One screenshot's entry in a [`ProjectConfiguration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotConfiguration {
    pub id: String,

    /// Display-only hint; images are never loaded from it.
    pub image_name: String,

    pub settings: ScreenshotItemSettings,
}

impl ProjectConfiguration {
    /// Key-sorted, pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        // Round-tripping through `Value` orders object keys.
        let value = serde_json::to_value(self).map_err(ProjectError::Encode)?;
        serde_json::to_string_pretty(&value).map_err(ProjectError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(json).map_err(ProjectError::InvalidConfiguration)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ProjectError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write a configuration file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, self.to_json()?).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Errors that can occur when working with projects.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed configuration: {0}")]
    InvalidConfiguration(serde_json::Error),

    #[error("Failed to encode configuration: {0}")]
    Encode(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbaColor;
    use crate::settings::{BackgroundStyle, DeviceFamily, TextPosition};

    fn image() -> RgbaImage {
        RgbaImage::new(4, 8)
    }

    fn project_with(n: usize) -> ScreenshotProject {
        let mut project = ScreenshotProject::new();
        project.add_images((0..n).map(|_| image()));
        project
    }

    #[test]
    fn test_add_images_caps_at_max_and_selects_last() {
        let mut project = ScreenshotProject::new();
        let added = project.add_images((0..7).map(|_| image()));
        assert_eq!(added, MAX_ITEMS);
        assert_eq!(project.len(), MAX_ITEMS);
        assert_eq!(project.selected_index(), MAX_ITEMS - 1);
        assert_eq!(project.add_images([image()]), 0);
    }

    #[test]
    fn test_select_preserves_edits_per_item() {
        let mut project = project_with(2);
        project.select(0);
        project.editing_mut().title_text = "First".to_string();
        project.select(1);
        assert_eq!(project.editing().title_text, "Your Title Here");
        project.editing_mut().title_text = "Second".to_string();
        project.select(0);

        assert_eq!(project.editing().title_text, "First");
        assert_eq!(project.items()[1].settings.title_text, "Second");
    }

    #[test]
    fn test_remove_before_selection_keeps_selected_item() {
        let mut project = project_with(3);
        project.select(2);
        project.editing_mut().subtitle_text = "third".to_string();
        let third_id = project.items()[2].id;

        project.remove_item(0).unwrap();
        assert_eq!(project.selected_index(), 1);
        assert_eq!(project.selected_item().unwrap().id, third_id);
        assert_eq!(project.editing().subtitle_text, "third");
        assert!(project.remove_item(5).is_none());
    }

    #[test]
    fn test_remove_last_selected_moves_selection_back() {
        let mut project = project_with(2);
        project.remove_item(1);
        assert_eq!(project.selected_index(), 0);
        project.remove_item(0);
        assert!(project.is_empty());
        assert!(project.selected_item().is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut project = project_with(2);
        project.editing_mut().title_font_size = 40.0;
        project.reset();
        assert!(project.is_empty());
        assert_eq!(project.editing(), &ScreenshotItemSettings::default());
    }

    #[test]
    fn test_configuration_round_trip() {
        let mut source = project_with(3);
        source.select(0);
        {
            let s = source.editing_mut();
            s.title_text = "Track habits".to_string();
            s.text_position = TextPosition::Below;
            s.background_style = BackgroundStyle::Gradient;
            s.background_gradient_angle = 135.0;
            s.text_color = RgbaColor::rgba(0.2, 0.3, 0.4, 0.9);
        }
        source.select(2);
        source.editing_mut().device_family = DeviceFamily::Tablet;
        source.editing_mut().screenshot_y_offset = -45.0;

        let json = source.export_configuration_json().unwrap();

        let mut target = project_with(3);
        let updated = target.import_configuration_json(&json).unwrap();
        assert_eq!(updated, 3);
        for (a, b) in source.items().iter().zip(target.items()) {
            assert_eq!(a.settings, b.settings);
        }
    }

    #[test]
    fn test_exported_json_has_sorted_keys() {
        let mut project = project_with(1);
        let json = project.export_configuration_json().unwrap();
        let export_pos = json.find("\"exportDate\"").unwrap();
        let screenshots_pos = json.find("\"screenshots\"").unwrap();
        assert!(export_pos < screenshots_pos);
        assert!(json.find("\"backgroundColor\"").unwrap() < json.find("\"titleText\"").unwrap());
        assert!(json.contains("\"imageName\": \"screenshot_1.png\""));
    }

    #[test]
    fn test_import_ignores_surplus_entries() {
        let mut five = project_with(5);
        for i in 0..5 {
            five.select(i);
            five.editing_mut().title_text = format!("title {i}");
        }
        let json = five.export_configuration_json().unwrap();

        let mut two = project_with(2);
        let updated = two.import_configuration_json(&json).unwrap();
        assert_eq!(updated, 2);
        assert_eq!(two.items()[0].settings.title_text, "title 0");
        assert_eq!(two.items()[1].settings.title_text, "title 1");
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn test_import_matches_ids_before_positions() {
        let mut project = project_with(2);
        let second_id = project.items()[1].id;
        let mut settings = ScreenshotItemSettings::default();
        settings.title_text = "by id".to_string();

        let config = ProjectConfiguration {
            screenshots: vec![ScreenshotConfiguration {
                id: second_id.to_string(),
                image_name: "screenshot_1.png".to_string(),
                settings,
            }],
            export_date: None,
        };
        project.import_configuration(&config);
        assert_eq!(project.items()[1].settings.title_text, "by id");
        assert_eq!(project.items()[0].settings.title_text, "Your Title Here");
    }

    #[test]
    fn test_import_position_fallback_skips_items_claimed_by_id() {
        let mut project = project_with(2);
        let second_id = project.items()[1].id;
        let entry = |id: String, title: &str| {
            let mut settings = ScreenshotItemSettings::default();
            settings.title_text = title.to_string();
            ScreenshotConfiguration {
                id,
                image_name: "screenshot.png".to_string(),
                settings,
            }
        };

        let config = ProjectConfiguration {
            screenshots: vec![
                entry(second_id.to_string(), "first"),
                entry("stale".to_string(), "second"),
            ],
            export_date: None,
        };
        let updated = project.import_configuration(&config);
        assert_eq!(updated, 2);
        assert_eq!(project.items()[1].settings.title_text, "first");
        assert_eq!(project.items()[0].settings.title_text, "second");
    }

    #[test]
    fn test_import_drops_positional_entry_when_its_slot_is_claimed() {
        let mut project = project_with(2);
        let first_id = project.items()[0].id;
        let second_id = project.items()[1].id;
        let entry = |id: String, title: &str| {
            let mut settings = ScreenshotItemSettings::default();
            settings.title_text = title.to_string();
            ScreenshotConfiguration {
                id,
                image_name: "screenshot.png".to_string(),
                settings,
            }
        };

        let config = ProjectConfiguration {
            screenshots: vec![
                entry("stale".to_string(), "orphan"),
                entry(first_id.to_string(), "one"),
                entry(second_id.to_string(), "two"),
            ],
            export_date: None,
        };
        assert_eq!(project.import_configuration(&config), 2);
        assert_eq!(project.items()[0].settings.title_text, "one");
        assert_eq!(project.items()[1].settings.title_text, "two");
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut project = project_with(2);
        project.select(0);
        project.editing_mut().title_text = "kept".to_string();
        project.commit_editing();

        let result = project.import_configuration_json(r#"{"screenshots": [ {"id": 1 "#);
        assert!(matches!(result, Err(ProjectError::InvalidConfiguration(_))));
        assert_eq!(project.items()[0].settings.title_text, "kept");
        assert_eq!(project.editing().title_text, "kept");
    }

    #[test]
    fn test_import_refreshes_editing_snapshot() {
        let mut source = project_with(1);
        source.editing_mut().subtitle_text = "fresh".to_string();
        let json = source.export_configuration_json().unwrap();

        let mut target = project_with(1);
        target.import_configuration_json(&json).unwrap();
        assert_eq!(target.editing().subtitle_text, "fresh");
    }

    #[test]
    fn test_configuration_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs").join("project.json");

        let mut project = project_with(2);
        let config = project.export_configuration();
        config.save(&path).unwrap();

        let loaded = ProjectConfiguration::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_project_save_and_load_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");

        let mut source = project_with(2);
        source.editing_mut().title_text = "Saved".to_string();
        source.save_configuration(&path).unwrap();

        let mut target = project_with(2);
        assert_eq!(target.load_configuration(&path).unwrap(), 2);
        assert_eq!(target.items()[1].settings.title_text, "Saved");
    }

    #[test]
    fn test_load_missing_configuration_reports_path() {
        let err = ProjectConfiguration::load(Path::new("/nonexistent/storeshot.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/storeshot.json"));
    }
}
