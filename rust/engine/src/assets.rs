// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asset collection.
//!
//! Assets are the point records found under asset-group folders (`POLE`),
//! anywhere in the tree, in document order.

use poleline_core::{DocumentTree, NodeKind};
use poleline_geometry::{extract_geometry, Geometry, Point2};

use crate::config::Markers;
use crate::diagnostics::Diagnostic;

/// Label given to records without a name.
pub const UNNAMED_LABEL: &str = "Unnamed";

/// A point asset and the record it came from.
#[derive(Debug)]
pub struct Asset<'a, T> {
    pub label: String,
    /// `x` = longitude, `y` = latitude.
    pub point: Point2<f64>,
    /// Originating record, re-emitted under the new label.
    pub record: &'a T,
}

impl<'a, T> Asset<'a, T> {
    pub fn new(label: impl Into<String>, point: Point2<f64>, record: &'a T) -> Self {
        Self {
            label: label.into(),
            point,
            record,
        }
    }
}

/// Collect every point record below an asset-group folder.
///
/// Nested asset folders are walked once, so each record yields at most one
/// asset.
pub fn collect_assets<'a, T: DocumentTree>(
    tree: &'a T,
    markers: &Markers,
) -> (Vec<Asset<'a, T>>, Vec<Diagnostic>) {
    let mut records = Vec::new();
    gather_asset_records(tree, &markers.asset_group, &mut records);

    let mut assets = Vec::with_capacity(records.len());
    let mut diagnostics = Vec::new();

    for record in records {
        let label = record
            .logical_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_LABEL);

        match extract_geometry(record) {
            Ok(Some(Geometry::Point(point))) => assets.push(Asset::new(label, point, record)),
            Ok(Some(_)) => {
                tracing::debug!(record = label, "Ignoring non-point record in asset folder");
            }
            Ok(None) => {}
            Err(err) => diagnostics.push(Diagnostic::Parse {
                record: label.to_string(),
                message: err.to_string(),
            }),
        }
    }

    tracing::debug!(assets = assets.len(), skipped = diagnostics.len(), "Collected assets");
    (assets, diagnostics)
}

fn is_asset_group<T: DocumentTree>(node: &T, asset_group: &str) -> bool {
    node.node_kind() == NodeKind::Folder && node.has_name(asset_group)
}

fn gather_asset_records<'a, T: DocumentTree>(node: &'a T, asset_group: &str, out: &mut Vec<&'a T>) {
    if is_asset_group(node, asset_group) {
        out.extend(node.records());
        return;
    }
    for child in node.child_nodes() {
        gather_asset_records(child, asset_group, out);
    }
}
