// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Poleline CLI
//!
//! Subcommand handlers behind the `poleline` binary.

pub mod classify;
pub mod config;
pub mod kml;
pub mod table;
pub mod zones;

use std::path::Path;

use anyhow::{Context, Result};
use poleline_core::Node;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,poleline=debug";

/// Read a normalized document tree from a JSON file.
pub fn load_document(path: &Path) -> Result<Node> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Node::from_json(&json)
        .with_context(|| format!("{} is not a normalized document tree", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "Loaded document");
    Ok(doc)
}
