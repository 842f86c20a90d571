//! List the export size catalog.

use storeshot_project_model::export_size::{all_sizes, sizes_for_export, ExportSize};
use storeshot_project_model::settings::DeviceFamily;

pub fn run(family: Option<DeviceFamily>, all: bool) -> anyhow::Result<()> {
    let families: Vec<DeviceFamily> = match family {
        Some(f) => vec![f],
        None => DeviceFamily::ALL.to_vec(),
    };

    for family in families {
        let sizes: Vec<ExportSize> = if all {
            all_sizes()
                .iter()
                .filter(|s| s.device_family == family)
                .copied()
                .collect()
        } else {
            sizes_for_export(family)
        };

        println!("{family}:");
        for size in sizes {
            println!(
                "  {:>4}x{:<4}  {:<28} {}",
                size.width,
                size.height,
                size.display_name,
                size.file_name()
            );
        }
    }

    if !all {
        println!();
        println!("Landscape sizes are not exported; pass --all to list them.");
    }

    Ok(())
}
