//! Rain Tracker
//!
//! Records and lists per-user "did it rain" observations over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 RAIN TRACKER                 │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│   rain   │───▶│  store  │  │
//!                    │  │ adapter │    │ service  │    │memory / │  │
//!   Client Response  │  │         │◀───│          │◀───│  file   │  │
//!   ◀────────────────┼──└─────────┘    └──────────┘    └─────────┘  │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns         │  │
//!                    │  │  config · observability · lifecycle    │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use rain_tracker::lifecycle::startup::{self, resolve_config};
use rain_tracker::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "rain-tracker")]
#[command(about = "HTTP service recording daily rain observations", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "RAIN_TRACKER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rain-tracker starting");

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
