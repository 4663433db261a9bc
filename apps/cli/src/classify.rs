// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Classify Subcommand
//!
//! Assigns poles to lines, renumbers them and writes the results.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use poleline_core::{DocumentTree, Node};
use poleline_engine::{run, Diagnostic, RunOutput, UnassignedRow, ZoningConfig};
use serde::Serialize;

use crate::config::ZoningArgs;
use crate::kml::write_kml;
use crate::load_document;
use crate::table::render_audit_table;

/// Encoding of the rebuilt hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Kml,
}

/// Arguments for the classify subcommand.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Normalized document tree (JSON).
    pub input: PathBuf,

    /// Where to write the rebuilt hierarchy (stdout when omitted).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hierarchy encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the audit rows (old name → new name) as JSON.
    #[arg(long, value_name = "FILE")]
    pub audit: Option<PathBuf>,

    /// Write unassigned assets and diagnostics as JSON.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the audit table to stdout.
    #[arg(long)]
    pub preview: bool,

    #[command(flatten)]
    pub zoning: ZoningArgs,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub zones: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub warnings: usize,
}

/// Unassigned assets and warnings of one run.
#[derive(Debug, Serialize)]
struct Report<'r> {
    summary: Summary,
    unassigned: Vec<UnassignedRow>,
    diagnostics: &'r [Diagnostic],
}

/// Run the subcommand with configuration from file, environment and flags.
pub fn execute(args: &ClassifyArgs) -> Result<Summary> {
    let config = args.zoning.resolve()?;
    classify_file(args, &config)
}

/// Run the subcommand with an already resolved configuration.
pub fn classify_file(args: &ClassifyArgs, config: &ZoningConfig) -> Result<Summary> {
    let doc = load_document(&args.input)?;
    let output = run(&doc, config)
        .with_context(|| format!("cannot renumber {}", args.input.display()))?;

    let summary = Summary {
        zones: output.zones.len(),
        assigned: output.audit.len(),
        unassigned: output.unassigned.len(),
        warnings: output.diagnostics.len(),
    };

    let document_name = document_name(&doc, &args.input);
    write_hierarchy(args, &output, &document_name)?;

    if let Some(path) = &args.audit {
        write_json(path, &output.audit)?;
        tracing::info!(path = %path.display(), rows = output.audit.len(), "Wrote audit");
    }
    if let Some(path) = &args.report {
        let report = Report {
            summary,
            unassigned: output.unassigned_rows(),
            diagnostics: &output.diagnostics,
        };
        write_json(path, &report)?;
        tracing::info!(path = %path.display(), "Wrote report");
    }
    if args.preview {
        print!("{}", render_audit_table(&output.audit));
    }

    Ok(summary)
}

fn write_hierarchy(
    args: &ClassifyArgs,
    output: &RunOutput<'_, Node>,
    document_name: &str,
) -> Result<()> {
    let writer = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &output.hierarchy.snapshot())?;
            writeln!(writer)?;
            writer.flush()?;
        }
        OutputFormat::Kml => write_kml(writer, &output.hierarchy, document_name)?,
    }
    if let Some(path) = &args.output {
        tracing::info!(path = %path.display(), format = ?args.format, "Wrote hierarchy");
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_json<S: Serialize>(path: &Path, value: &S) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Root name of the input, else the file stem.
fn document_name(doc: &Node, input: &Path) -> String {
    doc.logical_name()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "poleline".to_string())
}
