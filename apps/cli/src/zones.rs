// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Zones Subcommand
//!
//! Lists the zone index of a document without classifying anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use poleline_engine::{ZoneIndex, ZoningConfig};
use poleline_geometry::degrees_to_meters;
use serde::Serialize;

use crate::config::ZoningArgs;
use crate::load_document;

/// Arguments for the zones subcommand.
#[derive(Args, Debug, Clone)]
pub struct ZonesArgs {
    /// Normalized document tree (JSON).
    pub input: PathBuf,

    /// Print JSON instead of a text listing.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub zoning: ZoningArgs,
}

/// What the index knows about one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub name: String,
    pub key: Option<char>,
    /// False when the zone has neither a path nor a boundary.
    pub assignable: bool,
    pub path_vertices: Option<usize>,
    pub path_length_meters: Option<f64>,
    /// Boundaries usable by the boundary rule.
    pub boundaries: Vec<String>,
    /// Boundaries whose label does not start with the zone key.
    pub ignored_boundaries: Vec<String>,
}

pub fn execute(args: &ZonesArgs) -> Result<Vec<ZoneSummary>> {
    let config = args.zoning.resolve()?;
    let summaries = list_zones(args, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", render(&summaries));
    }
    Ok(summaries)
}

/// Build the zone index of the input and summarize it.
pub fn list_zones(args: &ZonesArgs, config: &ZoningConfig) -> Result<Vec<ZoneSummary>> {
    config.validate()?;
    let doc = load_document(&args.input)?;
    let (index, diagnostics) = ZoneIndex::build(&doc, &config.markers);
    for diagnostic in &diagnostics {
        diagnostic.log();
    }
    Ok(summarize(&index))
}

pub fn summarize(index: &ZoneIndex) -> Vec<ZoneSummary> {
    index
        .zones()
        .map(|zone| {
            let (boundaries, ignored_boundaries): (Vec<String>, Vec<String>) = zone
                .boundaries
                .keys()
                .cloned()
                .partition(|label| zone.accepts_boundary(label));
            ZoneSummary {
                name: zone.name.clone(),
                key: zone.key,
                assignable: zone.is_assignable(),
                path_vertices: zone.reference_path.as_ref().map(|p| p.vertices().len()),
                path_length_meters: zone
                    .reference_path
                    .as_ref()
                    .map(|p| degrees_to_meters(p.length())),
                boundaries,
                ignored_boundaries,
            }
        })
        .collect()
}

fn render(summaries: &[ZoneSummary]) -> String {
    let mut text = String::new();
    for zone in summaries {
        let path = match (zone.path_vertices, zone.path_length_meters) {
            (Some(vertices), Some(length)) => format!("path {} vertices, {:.1} m", vertices, length),
            _ => "no path".to_string(),
        };
        let note = if zone.assignable { "" } else { " (receives no assets)" };
        text.push_str(&format!("{}  [{}]{}\n", zone.name, path, note));
        for label in &zone.boundaries {
            text.push_str(&format!("  boundary {}\n", label));
        }
        for label in &zone.ignored_boundaries {
            text.push_str(&format!("  boundary {} (ignored: key mismatch)\n", label));
        }
    }
    text
}
