// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone Index Module
//!
//! Collects, per zone folder, the zone's reference path and its labelled
//! boundary regions.
//!
//! A zone folder is any folder whose name starts with the zone marker
//! (`LINE A`, `LINE B`, ...). Inside it:
//! - the first path record whose label contains the reference path marker
//!   becomes the zone's reference path
//! - every region record whose label contains the boundary marker becomes a
//!   boundary, keyed by its trimmed label

use std::collections::BTreeMap;

use poleline_core::{DocumentTree, NodeKind};
use poleline_geometry::{extract_geometry, Geometry, Path, Point2, Region};

use crate::config::Markers;
use crate::diagnostics::Diagnostic;

/// One zone and its spatial criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDefinition {
    /// Upper-cased, trimmed folder name.
    pub name: String,
    /// Identifying character that boundary labels must start with.
    pub key: Option<char>,
    pub reference_path: Option<Path>,
    /// Boundaries by label, in label order.
    pub boundaries: BTreeMap<String, Region>,
}

impl ZoneDefinition {
    /// Create an empty zone.
    ///
    /// The key is the first alphanumeric character after the zone marker
    /// (`A` for `LINE A`, `LINE-A` or `LINE_A`), or the first character of
    /// the name if nothing follows.
    pub fn new(name: &str, zone_marker: &str) -> Self {
        let name = name.trim().to_uppercase();
        let marker = zone_marker.trim().to_uppercase();
        let key = name
            .strip_prefix(marker.as_str())
            .and_then(|rest| {
                rest.trim_start_matches(|c: char| !c.is_alphanumeric())
                    .chars()
                    .next()
            })
            .or_else(|| name.chars().next());

        Self {
            name,
            key,
            reference_path: None,
            boundaries: BTreeMap::new(),
        }
    }

    pub fn with_reference_path(mut self, path: Path) -> Self {
        self.reference_path = Some(path);
        self
    }

    pub fn with_boundary(mut self, label: impl Into<String>, region: Region) -> Self {
        self.boundaries.insert(label.into(), region);
        self
    }

    /// Whether the zone can ever receive an assignment.
    pub fn is_assignable(&self) -> bool {
        self.reference_path.is_some() || !self.boundaries.is_empty()
    }

    /// Whether a boundary label belongs to this zone by naming convention.
    pub fn accepts_boundary(&self, label: &str) -> bool {
        let first = label
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next());
        matches!((self.key, first), (Some(k), Some(c)) if k == c)
    }

    /// Boundaries that satisfy the naming convention, in label order.
    pub fn matching_boundaries(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.boundaries
            .iter()
            .filter(move |(label, _)| self.accepts_boundary(label))
            .map(|(label, region)| (label.as_str(), region))
    }

    /// Label of the first matching boundary that strictly contains `point`.
    pub fn containing_boundary(&self, point: &Point2<f64>) -> Option<&str> {
        self.matching_boundaries()
            .find(|(_, region)| region.contains(point))
            .map(|(label, _)| label)
    }
}

/// All zones of a run, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneIndex {
    zones: BTreeMap<String, ZoneDefinition>,
}

impl ZoneIndex {
    /// Index prepared definitions.
    ///
    /// A later definition with an existing name replaces the earlier one and
    /// yields a [`Diagnostic::ZoneCollision`].
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ZoneDefinition>,
    ) -> (Self, Vec<Diagnostic>) {
        let mut zones = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for zone in definitions {
            let name = zone.name.clone();
            if zones.insert(name.clone(), zone).is_some() {
                diagnostics.push(Diagnostic::ZoneCollision { zone: name });
            }
        }

        (Self { zones }, diagnostics)
    }

    /// Build the index from a document tree.
    pub fn build<T: DocumentTree>(tree: &T, markers: &Markers) -> (Self, Vec<Diagnostic>) {
        let zone_prefix = markers.zone.trim().to_uppercase();
        let mut diagnostics = Vec::new();

        let definitions: Vec<_> = std::iter::once(tree)
            .chain(tree.descendants())
            .filter(|node| node.node_kind() == NodeKind::Folder)
            .filter(|node| {
                node.logical_name()
                    .map(|n| n.trim().to_uppercase().starts_with(&zone_prefix))
                    .unwrap_or(false)
            })
            .map(|group| read_zone(group, markers, &mut diagnostics))
            .collect();

        let (index, collisions) = Self::from_definitions(definitions);
        diagnostics.extend(collisions);

        tracing::debug!(
            zones = index.len(),
            with_path = index.zones().filter(|z| z.reference_path.is_some()).count(),
            boundaries = index.zones().map(|z| z.boundaries.len()).sum::<usize>(),
            "Built zone index"
        );

        (index, diagnostics)
    }

    pub fn get(&self, name: &str) -> Option<&ZoneDefinition> {
        self.zones.get(name)
    }

    /// Zones in name order.
    pub fn zones(&self) -> impl Iterator<Item = &ZoneDefinition> {
        self.zones.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn read_zone<T: DocumentTree>(
    group: &T,
    markers: &Markers,
    diagnostics: &mut Vec<Diagnostic>,
) -> ZoneDefinition {
    let mut zone = ZoneDefinition::new(group.logical_name().unwrap_or_default(), &markers.zone);
    let path_marker = markers.reference_path.trim().to_uppercase();
    let boundary_marker = markers.boundary.trim().to_uppercase();

    for record in group.records() {
        let label = record.logical_name().unwrap_or_default().trim();
        let upper = label.to_uppercase();
        let wants_path = upper.contains(&path_marker);
        let wants_boundary = upper.contains(&boundary_marker);
        if !wants_path && !wants_boundary {
            continue;
        }

        let geometry = match extract_geometry(record) {
            Ok(Some(geometry)) => geometry,
            Ok(None) => continue,
            Err(err) => {
                diagnostics.push(Diagnostic::Parse {
                    record: label.to_string(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        match geometry {
            Geometry::Path(path) if wants_path => {
                if zone.reference_path.is_none() {
                    zone.reference_path = Some(path);
                } else {
                    tracing::debug!(zone = %zone.name, record = label, "Ignoring extra reference path");
                }
            }
            Geometry::Region(region) if wants_boundary => {
                if zone.boundaries.insert(label.to_string(), region).is_some() {
                    diagnostics.push(Diagnostic::DuplicateBoundary {
                        zone: zone.name.clone(),
                        label: label.to_string(),
                    });
                }
            }
            _ => {
                tracing::debug!(zone = %zone.name, record = label, "Marker and geometry type disagree");
            }
        }
    }

    zone
}

#[cfg(test)]
mod tests {
    use super::*;
    use poleline_core::{GeometryKind, Node};

    fn cable(name: &str, coords: &str) -> Node {
        Node::placemark(name, GeometryKind::LineString, coords)
    }

    fn boundary(name: &str, coords: &str) -> Node {
        Node::placemark(name, GeometryKind::Polygon, coords)
    }

    #[test]
    fn key_follows_zone_marker() {
        assert_eq!(ZoneDefinition::new("line a", "LINE").key, Some('A'));
        assert_eq!(ZoneDefinition::new(" LINE  B2 ", "LINE").key, Some('B'));
        assert_eq!(ZoneDefinition::new("LINE", "LINE").key, Some('L'));
        assert_eq!(ZoneDefinition::new("LINE A", "LINE").name, "LINE A");
    }

    #[test]
    fn key_skips_separators() {
        for name in ["LINE-A", "line_a", "LINE - A", "LINE.A"] {
            let zone = ZoneDefinition::new(name, "LINE");
            assert_eq!(zone.key, Some('A'), "{}", name);
            assert!(zone.accepts_boundary("A1 BOUNDARY"), "{}", name);
        }
        assert_eq!(ZoneDefinition::new("LINE-", "LINE").key, Some('L'));
    }

    #[test]
    fn separated_zone_names_match_boundaries() {
        let square = "0,0 1,0 1,1 0,1";
        let doc = Node::document(vec![
            Node::folder("LINE-A", vec![boundary("A1 BOUNDARY", square)]),
            Node::folder("LINE_B", vec![boundary("B1 BOUNDARY", square)]),
        ]);

        let (index, diagnostics) = ZoneIndex::build(&doc, &Markers::default());
        assert!(diagnostics.is_empty());
        let inside = Point2::new(0.5, 0.5);
        assert_eq!(
            index.get("LINE-A").unwrap().containing_boundary(&inside),
            Some("A1 BOUNDARY")
        );
        assert_eq!(
            index.get("LINE_B").unwrap().containing_boundary(&inside),
            Some("B1 BOUNDARY")
        );
    }

    #[test]
    fn boundary_label_must_share_key() {
        let zone = ZoneDefinition::new("LINE A", "LINE");
        assert!(zone.accepts_boundary("A1 BOUNDARY"));
        assert!(zone.accepts_boundary("a2 boundary"));
        assert!(!zone.accepts_boundary("B1 BOUNDARY"));
        assert!(!zone.accepts_boundary(""));
    }

    #[test]
    fn builds_paths_and_boundaries() {
        let doc = Node::document(vec![
            Node::folder(
                "Line A",
                vec![
                    cable("DISTRIBUTION CABLE A", "0,0 1,0"),
                    cable("distribution cable spare", "5,5 6,6"),
                    boundary("A1 BOUNDARY", "0,0 1,0 1,1 0,1"),
                    boundary("A2 BOUNDARY", "2,0 3,0 3,1 2,1"),
                    Node::placemark("SERVICE DROP", GeometryKind::LineString, "0,0 0,1"),
                ],
            ),
            Node::folder("LINE B", vec![]),
            Node::folder("POLE", vec![]),
        ]);

        let (index, diagnostics) = ZoneIndex::build(&doc, &Markers::default());
        assert!(diagnostics.is_empty());
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["LINE A", "LINE B"]);

        let a = index.get("LINE A").unwrap();
        // First matching cable wins
        assert_eq!(a.reference_path.as_ref().unwrap().vertices()[1].x, 1.0);
        assert_eq!(
            a.boundaries.keys().collect::<Vec<_>>(),
            vec!["A1 BOUNDARY", "A2 BOUNDARY"]
        );
        assert!(a.is_assignable());

        let b = index.get("LINE B").unwrap();
        assert!(!b.is_assignable());
    }

    #[test]
    fn later_zone_shadows_earlier() {
        let doc = Node::document(vec![
            Node::folder("LINE A", vec![cable("DISTRIBUTION CABLE", "0,0 1,0")]),
            Node::folder("line a", vec![cable("DISTRIBUTION CABLE", "9,9 10,9")]),
        ]);

        let (index, diagnostics) = ZoneIndex::build(&doc, &Markers::default());
        assert_eq!(index.len(), 1);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ZoneCollision {
                zone: "LINE A".into()
            }]
        );
        let path = index.get("LINE A").unwrap().reference_path.as_ref().unwrap();
        assert_eq!(path.vertices()[0].x, 9.0);
    }

    #[test]
    fn duplicate_boundary_label_is_reported() {
        let doc = Node::document(vec![Node::folder(
            "LINE A",
            vec![
                boundary("A1 BOUNDARY", "0,0 1,0 1,1 0,1"),
                boundary("A1 BOUNDARY", "5,5 6,5 6,6 5,6"),
            ],
        )]);

        let (index, diagnostics) = ZoneIndex::build(&doc, &Markers::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind(), "duplicate-boundary");
        let region = &index.get("LINE A").unwrap().boundaries["A1 BOUNDARY"];
        assert!(region.contains(&Point2::new(5.5, 5.5)));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let doc = Node::document(vec![Node::folder(
            "LINE C",
            vec![
                cable("DISTRIBUTION CABLE", "0,0 oops"),
                cable("DISTRIBUTION CABLE 2", "0,0 1,1"),
            ],
        )]);

        let (index, diagnostics) = ZoneIndex::build(&doc, &Markers::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::Parse { record, .. } if record == "DISTRIBUTION CABLE"
        ));
        assert!(index.get("LINE C").unwrap().reference_path.is_some());
    }

    #[test]
    fn custom_markers() {
        let markers = Markers {
            zone: "JALUR".into(),
            reference_path: "KABEL".into(),
            boundary: "BATAS".into(),
            asset_group: "TIANG".into(),
        };
        let doc = Node::document(vec![Node::folder(
            "Jalur A",
            vec![cable("Kabel utama", "0,0 1,0")],
        )]);

        let (index, _) = ZoneIndex::build(&doc, &markers);
        let zone = index.get("JALUR A").unwrap();
        assert_eq!(zone.key, Some('A'));
        assert!(zone.reference_path.is_some());
    }
}
