mod app;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tower_constellation::{ConstellationConfig, TowerRoster};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_ROSTER: &str = include_str!("../demos/towers.json");

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Tower roster JSON; the bundled sample roster is used when omitted.
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Physics and interaction tunables as JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let roster = match &args.roster {
        Some(path) => TowerRoster::load(path)?,
        None => TowerRoster::parse(SAMPLE_ROSTER)?,
    };
    let config = match &args.config {
        Some(path) => ConstellationConfig::load(path)?,
        None => ConstellationConfig::default(),
    };
    info!(towers = roster.towers().len(), "starting tower constellation");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tower constellation",
        options,
        Box::new(move |cc| Ok(Box::new(app::ConstellationApp::new(cc, roster, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
