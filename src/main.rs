mod app;
mod catalog;
mod collage;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use collage::CollageFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Artist catalog (JSON array, or an object with a `groups` list)
    #[arg(long, default_value = "data/artists.json")]
    catalog: PathBuf,

    /// Which nodes the collage starts with
    #[arg(long, value_enum, default_value_t = CollageFilter::All)]
    filter: CollageFilter,

    /// Seed for radii sampling; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("echos_collage={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, filter = %args.filter, catalog = %args.catalog.display(), "starting collage");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let settings = app::LaunchSettings {
        catalog_path: args.catalog,
        filter: args.filter,
        seed,
    };

    eframe::run_native(
        "ECHOS",
        options,
        Box::new(move |cc| Ok(Box::new(app::EchosApp::new(cc, settings)))),
    )
}
