//! CLI subcommand implementations.

pub mod check;
pub mod export;
pub mod init;
pub mod layout;
pub mod render;
pub mod sizes;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use storeshot_common::config::AppConfig;
use storeshot_project_model::project::ProjectConfiguration;
use storeshot_project_model::settings::ScreenshotItemSettings;
use storeshot_render_engine::{parse_filter, AssetStore, Compositor};

/// Build a compositor from the configured frames, fonts and resize filter.
pub fn load_compositor(config: &AppConfig) -> anyhow::Result<Arc<Compositor>> {
    let assets = AssetStore::from_config(&config.assets)?;
    if assets.frames.is_empty() {
        tracing::warn!(
            dir = %config.assets.frames_dir.display(),
            "No frame assets loaded; renders will use placeholder geometry"
        );
    }
    let filter = parse_filter(&config.export.resize_filter)?;
    Ok(Arc::new(Compositor::new(Arc::new(assets)).with_filter(filter)))
}

pub fn load_image(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(image.into_rgba8())
}

/// Read settings from either a bare settings object or the first entry of
/// an exported project configuration.
pub fn load_settings(path: &Path) -> anyhow::Result<ScreenshotItemSettings> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a settings file", path.display()))?;
    let Some(object) = value.as_object() else {
        anyhow::bail!("{} is not a settings file: expected a JSON object", path.display());
    };

    if object.contains_key("screenshots") {
        let config = ProjectConfiguration::from_json(&content)
            .with_context(|| format!("{} is not a valid project configuration", path.display()))?;
        return match config.screenshots.into_iter().next() {
            Some(first) => Ok(first.settings),
            None => anyhow::bail!("{} has no screenshot entries", path.display()),
        };
    }

    if !has_settings_keys(object) {
        tracing::warn!(
            path = %path.display(),
            "No recognized settings keys; using default settings"
        );
    }
    serde_json::from_value(value)
        .with_context(|| format!("{} is not a settings file", path.display()))
}

/// Whether any key of `object` is a settings field name.
fn has_settings_keys(object: &serde_json::Map<String, serde_json::Value>) -> bool {
    match serde_json::to_value(ScreenshotItemSettings::default()) {
        Ok(serde_json::Value::Object(known)) => object.keys().any(|key| known.contains_key(key)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_settings_accepts_both_shapes() {
        let dir = tempfile::tempdir().unwrap();

        let bare = dir.path().join("settings.json");
        std::fs::write(&bare, r#"{"titleText":"Bare","deviceType":"iPad"}"#).unwrap();
        let settings = load_settings(&bare).unwrap();
        assert_eq!(settings.title_text, "Bare");

        let project = dir.path().join("project.json");
        std::fs::write(
            &project,
            r#"{"screenshots":[{"id":"x","imageName":"screenshot_1.png","settings":{"titleText":"Project"}}]}"#,
        )
        .unwrap();
        assert_eq!(load_settings(&project).unwrap().title_text, "Project");
    }

    #[test]
    fn test_load_settings_rejects_non_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "title: nope").unwrap();
        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_load_settings_rejects_configuration_without_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"screenshots":[]}"#).unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("no screenshot entries"));
    }

    #[test]
    fn test_load_settings_rejects_non_object_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_unrelated_object_has_no_settings_keys() {
        let unrelated: serde_json::Value =
            serde_json::from_str(r#"{"title":"x","colour":"red"}"#).unwrap();
        assert!(!has_settings_keys(unrelated.as_object().unwrap()));

        let settings: serde_json::Value =
            serde_json::from_str(r#"{"title":"x","deviceType":"iPad"}"#).unwrap();
        assert!(has_settings_keys(settings.as_object().unwrap()));
    }
}
