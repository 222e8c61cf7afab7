//! RF2 filter binary.

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    let config = args.to_config();
    let report = match rf2_filter::run(&config) {
        Ok(report) => report,
        Err(e) => {
            if e.is_config_error() {
                tracing::error!("Invalid parameters: {}", e);
            } else if e.is_format_error() {
                tracing::error!("Unexpected relationship file layout: {}", e);
            } else {
                tracing::error!("Filter failed: {}", e);
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        "Filtered {} files ({} lines kept, {} skipped), copied {}, excluded {}",
        report.files_filtered,
        report.lines_kept,
        report.lines_skipped,
        report.files_copied,
        report.files_excluded
    );
    tracing::info!("Output written to {}", report.destination_root.display());

    Ok(())
}
