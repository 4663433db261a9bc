// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end run over one document.

use poleline_core::DocumentTree;

use crate::assets::{collect_assets, Asset};
use crate::audit::{audit_rows, unassigned_rows, AuditRow, UnassignedRow};
use crate::builder::{build_hierarchy, Hierarchy};
use crate::classifier::classify;
use crate::config::ZoningConfig;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::renumber::renumber;
use crate::zone_index::ZoneIndex;

/// Complete output of a run.
#[derive(Debug)]
pub struct RunOutput<'a, T> {
    pub zones: ZoneIndex,
    pub hierarchy: Hierarchy<'a, T>,
    pub audit: Vec<AuditRow>,
    pub unassigned: Vec<Asset<'a, T>>,
    /// Warnings in the order they were raised: zone index, assets, classifier.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a, T> RunOutput<'a, T> {
    pub fn unassigned_rows(&self) -> Vec<UnassignedRow> {
        unassigned_rows(&self.unassigned)
    }
}

/// Classify and renumber the assets of `tree`.
///
/// Either every stage succeeds and the full output is returned, or a
/// configuration error is returned and nothing else.
pub fn run<'a, T: DocumentTree>(tree: &'a T, config: &ZoningConfig) -> Result<RunOutput<'a, T>> {
    config.validate()?;

    let (zones, mut diagnostics) = ZoneIndex::build(tree, &config.markers);
    let (assets, asset_diagnostics) = collect_assets(tree, &config.markers);
    diagnostics.extend(asset_diagnostics);

    let classification = classify(
        assets,
        &zones,
        config.threshold_meters,
        config.unassigned_fallback,
    );
    diagnostics.extend(classification.diagnostics);

    let labeled = renumber(
        classification.assignments,
        &config.prefix,
        config.pad_width,
    )?;

    let hierarchy = build_hierarchy(
        &zones,
        &labeled,
        config.output_shape,
        config.markers.asset_group.trim(),
    );
    let audit = audit_rows(&labeled);

    for diagnostic in &diagnostics {
        diagnostic.log();
    }
    tracing::info!(
        zones = zones.len(),
        assigned = audit.len(),
        unassigned = classification.unassigned.len(),
        warnings = diagnostics.len(),
        shape = %config.output_shape,
        "Run complete"
    );

    Ok(RunOutput {
        zones,
        hierarchy,
        audit,
        unassigned: classification.unassigned,
        diagnostics,
    })
}
