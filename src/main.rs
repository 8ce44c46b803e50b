//! hiringlab-exporter - scripted CSV exporter for the Hiring Lab dashboards
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use clap::Parser;
use hiringlab_exporter::browser::BrowserSession;
use hiringlab_exporter::export::engine::reset_output_dir;
use hiringlab_exporter::{Catalog, ExporterConfig, ExportPlan, TraversalEngine};

/// Scripted CSV exporter for the Hiring Lab dashboards
#[derive(Parser, Debug)]
#[command(name = "hiringlab-exporter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a config file (default: ~/.config/hiringlab-exporter/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output directory for the exported CSVs (wiped on every run)
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Base URL of the dashboard site
    #[arg(long)]
    base_url: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Explicit Chrome/Chromium executable
    #[arg(long)]
    chrome: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = match args.config {
        Some(ref path) => ExporterConfig::load_from_file(path)?,
        None => ExporterConfig::load(),
    };

    // Apply CLI overrides
    if let Some(output_dir) = args.output_dir {
        config.export.output_dir = output_dir;
    }

    if let Some(base_url) = args.base_url {
        config.site.base_url = base_url;
    }

    if args.headed {
        config.browser.headless = false;
    }

    if let Some(chrome) = args.chrome {
        config.browser.chrome_executable = Some(chrome);
    }

    // A run is a complete refresh of the output directory
    reset_output_dir(&config.export.output_dir)?;

    let session = BrowserSession::launch(&config).await?;
    let engine = TraversalEngine::new(session, Catalog::default(), ExportPlan::default(), config);

    let result = engine.run().await;

    // Close the browser regardless of outcome
    if let Err(e) = engine.shutdown().await {
        eprintln!("Warning: failed to close browser: {}", e);
    }

    match result {
        Ok(summary) => {
            println!("\nAll exports completed ({} files).", summary.files.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("\nExport run failed: {}", e);
            Err(e.into())
        }
    }
}
