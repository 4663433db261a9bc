// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat audit table for previews and reports.

use serde::Serialize;

use crate::assets::Asset;
use crate::renumber::Labeled;

/// One renumbered asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRow {
    pub zone: String,
    pub original_label: String,
    pub new_label: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// An asset that matched no zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnassignedRow {
    pub original_label: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Audit rows in global label order.
pub fn audit_rows<T>(labeled: &[Labeled<'_, T>]) -> Vec<AuditRow> {
    labeled
        .iter()
        .map(|item| AuditRow {
            zone: item.assignment.zone.clone(),
            original_label: item.assignment.asset.label.clone(),
            new_label: item.label.clone(),
            longitude: item.assignment.asset.point.x,
            latitude: item.assignment.asset.point.y,
        })
        .collect()
}

/// Rows for unassigned assets, in input order.
pub fn unassigned_rows<T>(assets: &[Asset<'_, T>]) -> Vec<UnassignedRow> {
    assets
        .iter()
        .map(|asset| UnassignedRow {
            original_label: asset.label.clone(),
            longitude: asset.point.x,
            latitude: asset.point.y,
        })
        .collect()
}
