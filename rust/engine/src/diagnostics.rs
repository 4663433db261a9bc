// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recoverable problems reported alongside a run's output.

use serde::Serialize;
use thiserror::Error;

/// A non-fatal warning. Runs always complete when only these occur.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A record's coordinate text could not be decoded; the record was skipped.
    #[error("skipped record '{record}': {message}")]
    Parse { record: String, message: String },

    /// Two zone folders normalise to the same name; the later one is kept.
    #[error("zone '{zone}' is defined more than once; the later definition replaces the earlier one")]
    ZoneCollision { zone: String },

    /// Two boundaries of one zone share a label; the later one is kept.
    #[error("zone '{zone}' has more than one boundary labelled '{label}'; the later one is used")]
    DuplicateBoundary { zone: String, label: String },

    /// An asset matched no zone.
    #[error("asset '{asset}' at ({lon}, {lat}) matched no zone")]
    UnassignedAsset { asset: String, lon: f64, lat: f64 },

    /// An asset lies inside boundaries of several zones.
    #[error("asset '{asset}' lies inside boundaries of {candidates:?}; assigned to '{chosen}'")]
    AmbiguousAssignment {
        asset: String,
        candidates: Vec<String>,
        chosen: String,
    },
}

impl Diagnostic {
    /// Short machine-readable kind, matching the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::Parse { .. } => "parse",
            Diagnostic::ZoneCollision { .. } => "zone-collision",
            Diagnostic::DuplicateBoundary { .. } => "duplicate-boundary",
            Diagnostic::UnassignedAsset { .. } => "unassigned-asset",
            Diagnostic::AmbiguousAssignment { .. } => "ambiguous-assignment",
        }
    }

    /// Emit the diagnostic as a `warn` event.
    pub fn log(&self) {
        tracing::warn!(kind = self.kind(), "{}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let diagnostic = Diagnostic::ZoneCollision {
            zone: "LINE A".into(),
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "zone-collision");
        assert_eq!(json["zone"], "LINE A");
        assert_eq!(diagnostic.kind(), "zone-collision");
    }

    #[test]
    fn message_names_the_asset() {
        let diagnostic = Diagnostic::UnassignedAsset {
            asset: "P3".into(),
            lon: 106.5,
            lat: -6.25,
        };
        assert_eq!(
            diagnostic.to_string(),
            "asset 'P3' at (106.5, -6.25) matched no zone"
        );
    }
}
