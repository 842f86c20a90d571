//! Storeshot CLI: command-line interface for App Store screenshot composition.
//!
//! Usage:
//!   storeshot sizes              List export sizes
//!   storeshot layout [OPTIONS]   Show the computed layout for a canvas
//!   storeshot render <IMAGE>     Render one composite image
//!   storeshot export <IMAGES..>  Batch-export every catalog size
//!   storeshot init <PATH>        Write a default settings file
//!   storeshot check              Check configured frames and fonts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storeshot_common::config::AppConfig;
use storeshot_project_model::settings::{DeviceFamily, TextPosition};

mod commands;

#[derive(Parser)]
#[command(
    name = "storeshot",
    about = "Compose device-framed App Store screenshots",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Application config file (defaults to $XDG_CONFIG_HOME/storeshot/config.json)
    #[arg(long, global = true)]
    app_config: Option<PathBuf>,

    /// Override the frame asset directory
    #[arg(long, global = true)]
    frames_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List App Store export sizes
    Sizes {
        /// Only show one device family: phone or tablet
        #[arg(long)]
        family: Option<DeviceFamily>,

        /// Include landscape sizes (never exported)
        #[arg(long)]
        all: bool,
    },

    /// Show the computed layout for a canvas
    Layout {
        /// Device family: phone or tablet
        #[arg(long, default_value = "phone")]
        family: DeviceFamily,

        /// Canvas width
        #[arg(long, default_value = "1284")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "2778")]
        height: u32,

        /// Native frame width (defaults to the loaded frame asset)
        #[arg(long, requires = "frame_height")]
        frame_width: Option<u32>,

        /// Native frame height (defaults to the loaded frame asset)
        #[arg(long, requires = "frame_width")]
        frame_height: Option<u32>,

        /// Text position: above or below
        #[arg(long, default_value = "above")]
        position: TextPosition,

        /// Vertical device offset in frame units (positive moves up)
        #[arg(long, default_value = "0")]
        offset: f64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single composite image
    Render {
        /// Screenshot image
        image: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "storeshot.png")]
        output: PathBuf,

        /// Output width
        #[arg(long, default_value = "1284")]
        width: u32,

        /// Output height
        #[arg(long, default_value = "2778")]
        height: u32,

        /// Settings file (single settings object or exported project configuration)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the device family from the settings
        #[arg(long)]
        family: Option<DeviceFamily>,
    },

    /// Export screenshots at every App Store size for their device family
    Export {
        /// Screenshot images, in order (at most 5)
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Destination folder
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exported project configuration to apply
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default settings file
    Init {
        /// Path of the configuration file to create
        path: PathBuf,

        /// Number of screenshot entries
        #[arg(long, default_value = "1")]
        count: usize,

        /// Device family for every entry
        #[arg(long, default_value = "phone")]
        family: DeviceFamily,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check configured frame assets and fonts
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.app_config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(dir) = cli.frames_dir {
        config.assets.frames_dir = dir;
    }

    // Initialize logging
    storeshot_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Sizes { family, all } => commands::sizes::run(family, all),
        Commands::Layout {
            family,
            width,
            height,
            frame_width,
            frame_height,
            position,
            offset,
            json,
        } => commands::layout::run(
            &config,
            commands::layout::LayoutArgs {
                family,
                width,
                height,
                frame_size: frame_width.zip(frame_height),
                position,
                offset,
                json,
            },
        ),
        Commands::Render {
            image,
            output,
            width,
            height,
            config: settings,
            family,
        } => commands::render::run(&config, image, output, width, height, settings, family),
        Commands::Export {
            images,
            output,
            config: settings,
        } => commands::export::run(&config, images, output, settings).await,
        Commands::Init {
            path,
            count,
            family,
            force,
        } => commands::init::run(path, count, family, force),
        Commands::Check => commands::check::run(&config),
    }
}
