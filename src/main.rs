use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use appagenda::Diagnostics;

#[derive(Parser, Debug)]
#[command(name = "appagenda")]
#[command(about = "Generate event-app agenda, speaker and attendee spreadsheets from conference program data")]
struct Args {
    /// JSON file describing the order, mapping and metadata inputs
    config_file: PathBuf,

    /// Output XLSX file for the agenda and speakers
    output_agenda_file: PathBuf,

    /// Output XLSX file for attendees who are not speakers
    output_attendee_file: PathBuf,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut diag = Diagnostics::new();
    appagenda::generate(
        &args.config_file,
        &args.output_agenda_file,
        &args.output_attendee_file,
        &mut diag,
    )
    .with_context(|| format!("Failed to generate agenda from {}", args.config_file.display()))?;

    if diag.is_empty() {
        info!("Done, no warnings");
    } else {
        warn!("Done with {} warning(s):", diag.len());
        for (kind, count) in diag.summary() {
            warn!("  {}: {}", kind, count);
        }
    }

    Ok(())
}
