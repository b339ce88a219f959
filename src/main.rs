//! SizeRank -- find the largest files and folders under a directory.
//!
//! Thin binary entry point. All logic lives in the `sizerank-core`
//! and `sizerank-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use sizerank_core::{ScanMode, SizeUnit};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "SizeRank")]
#[command(about = "Find the largest files and folders under a directory")]
#[command(version)]
struct Args {
    /// Folder to pre-fill for scanning (defaults to the working directory)
    root: Option<PathBuf>,

    /// Initial display unit: B, KiB, MiB or GiB
    #[arg(short, long, default_value_t = SizeUnit::default())]
    unit: SizeUnit,

    /// Start in folder mode instead of file mode
    #[arg(long)]
    folders: bool,
}

impl Args {
    fn mode(&self) -> ScanMode {
        if self.folders {
            ScanMode::Folders
        } else {
            ScanMode::Files
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("SizeRank starting");

    let state = sizerank_gui::SizeRankState::build(args.root.clone())
        .with_unit(args.unit)
        .with_mode(args.mode());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SizeRank -- Largest Files and Folders")
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([640.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SizeRank",
        options,
        Box::new(|cc| Ok(Box::new(sizerank_gui::SizeRankApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
