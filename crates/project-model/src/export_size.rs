//! Catalog of App Store target resolutions.
//!
//! Eight sizes are tabled, four per device family. Only the portrait
//! entries are offered for export; landscape sizes stay in the table for
//! lookup but [`sizes_for_export`] deliberately never returns them.

use serde::Serialize;

use crate::settings::{DeviceFamily, Orientation};

/// A named target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExportSize {
    pub width: u32,
    pub height: u32,
    pub device_family: DeviceFamily,
    pub display_name: &'static str,
}

impl ExportSize {
    pub const fn new(
        width: u32,
        height: u32,
        device_family: DeviceFamily,
        display_name: &'static str,
    ) -> Self {
        Self {
            width,
            height,
            device_family,
            display_name,
        }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// `{family}_{width}x{height}_{orientation}.png`, all lower-case tokens.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}x{}_{}.png",
            self.device_family.token(),
            self.width,
            self.height,
            self.orientation().token()
        )
    }

    /// Frame asset key matching this size's family and orientation.
    pub fn frame_asset_name(&self) -> String {
        self.device_family.frame_asset_name(self.orientation())
    }
}

pub const PHONE_1284X2778: ExportSize =
    ExportSize::new(1284, 2778, DeviceFamily::Phone, "iPhone 6.5\" Portrait");
pub const PHONE_2778X1284: ExportSize =
    ExportSize::new(2778, 1284, DeviceFamily::Phone, "iPhone 6.5\" Landscape");
pub const PHONE_1242X2688: ExportSize =
    ExportSize::new(1242, 2688, DeviceFamily::Phone, "iPhone 6.5\" Alt Portrait");
pub const PHONE_2688X1242: ExportSize =
    ExportSize::new(2688, 1242, DeviceFamily::Phone, "iPhone 6.5\" Alt Landscape");

pub const TABLET_2064X2752: ExportSize =
    ExportSize::new(2064, 2752, DeviceFamily::Tablet, "iPad 13\" Portrait");
pub const TABLET_2752X2064: ExportSize =
    ExportSize::new(2752, 2064, DeviceFamily::Tablet, "iPad 13\" Landscape");
pub const TABLET_2048X2732: ExportSize =
    ExportSize::new(2048, 2732, DeviceFamily::Tablet, "iPad 12.9\" Portrait");
pub const TABLET_2732X2048: ExportSize =
    ExportSize::new(2732, 2048, DeviceFamily::Tablet, "iPad 12.9\" Landscape");

/// Every tabled size, in declaration order.
pub const ALL_SIZES: [ExportSize; 8] = [
    PHONE_1284X2778,
    PHONE_2778X1284,
    PHONE_1242X2688,
    PHONE_2688X1242,
    TABLET_2064X2752,
    TABLET_2752X2064,
    TABLET_2048X2732,
    TABLET_2732X2048,
];

pub fn all_sizes() -> &'static [ExportSize] {
    &ALL_SIZES
}

pub fn portrait_sizes(family: DeviceFamily) -> Vec<ExportSize> {
    ALL_SIZES
        .iter()
        .filter(|s| s.device_family == family && s.is_portrait())
        .copied()
        .collect()
}

pub fn landscape_sizes(family: DeviceFamily) -> Vec<ExportSize> {
    ALL_SIZES
        .iter()
        .filter(|s| s.device_family == family && s.is_landscape())
        .copied()
        .collect()
}

/// Sizes rendered by a batch export for `family`: portrait only, catalog order.
pub fn sizes_for_export(family: DeviceFamily) -> Vec<ExportSize> {
    portrait_sizes(family)
}

/// Look up a tabled size by its pixel dimensions.
pub fn find(width: u32, height: u32) -> Option<ExportSize> {
    ALL_SIZES
        .iter()
        .find(|s| s.width == width && s.height == height)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_sizes_per_family() {
        for family in DeviceFamily::ALL {
            let count = all_sizes()
                .iter()
                .filter(|s| s.device_family == family)
                .count();
            assert_eq!(count, 4);
            assert_eq!(portrait_sizes(family).len(), 2);
            assert_eq!(landscape_sizes(family).len(), 2);
        }
    }

    #[test]
    fn test_export_sizes_are_portrait_in_catalog_order() {
        let phone = sizes_for_export(DeviceFamily::Phone);
        assert_eq!(phone, vec![PHONE_1284X2778, PHONE_1242X2688]);

        let tablet = sizes_for_export(DeviceFamily::Tablet);
        assert_eq!(tablet, vec![TABLET_2064X2752, TABLET_2048X2732]);
        assert!(tablet.iter().all(ExportSize::is_portrait));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(PHONE_1284X2778.file_name(), "phone_1284x2778_portrait.png");
        assert_eq!(TABLET_2732X2048.file_name(), "tablet_2732x2048_landscape.png");
    }

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<String> = all_sizes().iter().map(ExportSize::file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL_SIZES.len());
    }

    #[test]
    fn test_find_and_frame_asset_name() {
        let size = find(2048, 2732).unwrap();
        assert_eq!(size.device_family, DeviceFamily::Tablet);
        assert_eq!(
            size.frame_asset_name(),
            "iPad Air 13\" - M2 - Space Gray - Portrait"
        );
        assert!(find(100, 100).is_none());
    }
}
