use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use clipper_core::time::julian_day_from_unix;
use clipperwatch::catalog::Catalog;
use clipperwatch::horizons::HorizonsClient;
use clipperwatch::render;
use clipperwatch::snapshot::{self, SnapshotConfig};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "ClipperWatch: single-frame deep-space mission snapshot"
)]
struct Cli {
    /// Spacecraft to track (case-insensitive catalog name)
    #[arg(long, default_value = "Europa Clipper")]
    spacecraft: String,

    /// Pick the tracked spacecraft at random
    #[arg(long, default_value_t = false)]
    random: bool,

    /// List supported spacecraft and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Output PNG path
    #[arg(long, default_value = "clipper_watch.png")]
    output: PathBuf,

    /// Output width in pixels
    #[arg(long, default_value_t = render::DEFAULT_WIDTH)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = render::DEFAULT_HEIGHT)]
    height: u32,

    /// Third telemetry observer, after Sun and Earth
    #[arg(long, default_value = "Europa")]
    observer: String,

    /// Override the built-in body catalog with a YAML file
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };

    if cli.list {
        for entry in catalog.spacecraft() {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    println!("Starting ClipperWatch...");

    let tracked = if cli.random {
        let entry = catalog.random_spacecraft(&mut rand::thread_rng())?;
        println!("Selected {}!", entry.name);
        entry
    } else {
        catalog
            .find(&cli.spacecraft)
            .filter(|entry| entry.is_spacecraft())
            .ok_or_else(|| anyhow::anyhow!("Spacecraft {} not found!", cli.spacecraft))?
    };

    // Resolve every name up front so a bad observer fails before any fetch.
    catalog.horizons_id(&cli.observer)?;

    let now = Utc::now();
    let config = SnapshotConfig {
        extra_observer: &cli.observer,
        today: now.date_naive(),
        instant_jd: julian_day_from_unix(now.timestamp() as f64),
    };

    let client = HorizonsClient::new()?;
    let snapshot = snapshot::assemble(&client, &catalog, tracked, &config)?;
    render::render_png(&snapshot, &cli.output, cli.width, cli.height)?;
    println!("Image saved to {}.", cli.output.display());

    Ok(())
}
