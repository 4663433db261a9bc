// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poleline - assign poles to lines and renumber them.
//!
//! # Commands
//!
//! - `poleline classify <input>` - classify, renumber and write the hierarchy
//! - `poleline zones <input>` - list the zones found in a document
//!
//! Settings come from `--config`, then `POLELINE_*` environment variables,
//! then flags. Logs go to stderr and follow `RUST_LOG`.

use clap::{Parser, Subcommand};
use poleline_cli::{classify, zones, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "poleline", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign poles to lines and renumber them.
    Classify(classify::ClassifyArgs),
    /// List the zones (lines) of a document.
    Zones(zones::ZonesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify(args) => {
            let summary = classify::execute(&args)?;
            tracing::info!(
                zones = summary.zones,
                assigned = summary.assigned,
                unassigned = summary.unassigned,
                warnings = summary.warnings,
                "Done"
            );
        }
        Commands::Zones(args) => {
            zones::execute(&args)?;
        }
    }

    Ok(())
}
