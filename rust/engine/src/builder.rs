// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document Builder
//!
//! Regroups labelled assets into a zone hierarchy ready for serialization.
//! Only grouping happens here; containment was settled by the classifier.

use std::collections::BTreeMap;

use poleline_core::DocumentTree;
use poleline_geometry::Point2;
use serde::Serialize;

use crate::classifier::MatchRule;
use crate::config::OutputShape;
use crate::renumber::Labeled;
use crate::zone_index::ZoneIndex;

/// A relabelled asset pointing back at its original record.
#[derive(Debug)]
pub struct Entry<'a, T> {
    pub label: String,
    pub original_label: String,
    pub point: Point2<f64>,
    pub rule: MatchRule,
    pub record: &'a T,
}

/// Named group of entries inside a zone.
#[derive(Debug)]
pub struct AssetGroup<'a, T> {
    pub name: String,
    pub entries: Vec<Entry<'a, T>>,
}

/// One zone of the output.
#[derive(Debug)]
pub struct ZoneGroup<'a, T> {
    pub name: String,
    pub groups: Vec<AssetGroup<'a, T>>,
}

impl<'a, T> ZoneGroup<'a, T> {
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Rebuilt zone → group → asset tree.
#[derive(Debug)]
pub struct Hierarchy<'a, T> {
    pub zones: Vec<ZoneGroup<'a, T>>,
}

/// Build the hierarchy.
///
/// Every zone of the index appears, in name order, even when empty.
/// `asset_group` names the flat group and, in the nested shape, the group of
/// assets that lie inside no boundary.
pub fn build_hierarchy<'a, T>(
    index: &ZoneIndex,
    labeled: &[Labeled<'a, T>],
    shape: OutputShape,
    asset_group: &str,
) -> Hierarchy<'a, T> {
    let mut by_zone: BTreeMap<&str, Vec<&Labeled<'a, T>>> = BTreeMap::new();
    for item in labeled {
        by_zone
            .entry(item.assignment.zone.as_str())
            .or_default()
            .push(item);
    }

    let zones = index
        .names()
        .map(|name| {
            let items = by_zone.remove(name).unwrap_or_default();
            let groups = match shape {
                OutputShape::Flat => vec![AssetGroup {
                    name: asset_group.to_string(),
                    entries: items.into_iter().map(entry).collect(),
                }],
                OutputShape::BoundaryNested => nested_groups(items, asset_group),
            };
            ZoneGroup {
                name: name.to_string(),
                groups,
            }
        })
        .collect();

    Hierarchy { zones }
}

fn entry<'a, T>(item: &Labeled<'a, T>) -> Entry<'a, T> {
    Entry {
        label: item.label.clone(),
        original_label: item.assignment.asset.label.clone(),
        point: item.assignment.asset.point,
        rule: item.assignment.rule,
        record: item.assignment.asset.record,
    }
}

fn nested_groups<'a, T>(items: Vec<&Labeled<'a, T>>, asset_group: &str) -> Vec<AssetGroup<'a, T>> {
    let mut by_boundary: BTreeMap<&str, Vec<Entry<'a, T>>> = BTreeMap::new();
    let mut outside = Vec::new();

    for item in items {
        match item.assignment.boundary.as_deref() {
            Some(label) => by_boundary.entry(label).or_default().push(entry(item)),
            None => outside.push(entry(item)),
        }
    }

    let mut groups: Vec<_> = by_boundary
        .into_iter()
        .map(|(name, entries)| AssetGroup {
            name: name.to_string(),
            entries,
        })
        .collect();
    if !outside.is_empty() {
        groups.push(AssetGroup {
            name: asset_group.to_string(),
            entries: outside,
        });
    }
    groups
}

/// Serializable view of a [`Hierarchy`].
#[derive(Debug, Serialize)]
pub struct HierarchySnapshot {
    pub zones: Vec<ZoneSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ZoneSnapshot {
    pub name: String,
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub assets: Vec<EntrySnapshot>,
}

#[derive(Debug, Serialize)]
pub struct EntrySnapshot {
    pub label: String,
    pub original_label: String,
    pub longitude: f64,
    pub latitude: f64,
    pub rule: MatchRule,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl<'a, T: DocumentTree> Hierarchy<'a, T> {
    pub fn snapshot(&self) -> HierarchySnapshot {
        HierarchySnapshot {
            zones: self
                .zones
                .iter()
                .map(|zone| ZoneSnapshot {
                    name: zone.name.clone(),
                    groups: zone
                        .groups
                        .iter()
                        .map(|group| GroupSnapshot {
                            name: group.name.clone(),
                            assets: group.entries.iter().map(entry_snapshot).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn entry_snapshot<T: DocumentTree>(entry: &Entry<'_, T>) -> EntrySnapshot {
    EntrySnapshot {
        label: entry.label.clone(),
        original_label: entry.original_label.clone(),
        longitude: entry.point.x,
        latitude: entry.point.y,
        rule: entry.rule,
        properties: entry
            .record
            .record_properties()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Asset;
    use crate::classifier::Assignment;
    use crate::zone_index::ZoneDefinition;
    use poleline_core::{GeometryKind, Node};

    fn labeled<'a>(
        record: &'a Node,
        zone: &str,
        boundary: Option<&str>,
        sequence: u64,
    ) -> Labeled<'a, Node> {
        Labeled {
            assignment: Assignment {
                asset: Asset::new(
                    record.name.clone().unwrap_or_default(),
                    Point2::new(1.0, 2.0),
                    record,
                ),
                zone: zone.into(),
                ordering_key: 0.0,
                rule: MatchRule::Boundary,
                boundary: boundary.map(str::to_owned),
            },
            sequence,
            label: format!("N{}", sequence),
        }
    }

    fn index() -> ZoneIndex {
        ZoneIndex::from_definitions(vec![
            ZoneDefinition::new("LINE A", "LINE"),
            ZoneDefinition::new("LINE B", "LINE"),
            ZoneDefinition::new("LINE C", "LINE"),
        ])
        .0
    }

    #[test]
    fn flat_shape_keeps_every_zone() {
        let p1 = Node::placemark("P1", GeometryKind::Point, "1,2")
            .with_property("description", "concrete");
        let p2 = Node::placemark("P2", GeometryKind::Point, "1,2");
        let items = vec![
            labeled(&p1, "LINE A", Some("A1 BOUNDARY"), 1),
            labeled(&p2, "LINE C", None, 2),
        ];

        let hierarchy = build_hierarchy(&index(), &items, OutputShape::Flat, "POLE");
        let names: Vec<_> = hierarchy.zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["LINE A", "LINE B", "LINE C"]);
        assert_eq!(hierarchy.zones[1].entry_count(), 0);
        assert_eq!(hierarchy.zones[0].groups[0].name, "POLE");

        let first = &hierarchy.zones[0].groups[0].entries[0];
        assert_eq!(first.label, "N1");
        assert_eq!(first.original_label, "P1");
        // Same record, not a copy
        assert!(std::ptr::eq(first.record, &p1));
    }

    #[test]
    fn nested_shape_groups_by_boundary() {
        let p1 = Node::placemark("P1", GeometryKind::Point, "1,2");
        let p2 = Node::placemark("P2", GeometryKind::Point, "1,2");
        let p3 = Node::placemark("P3", GeometryKind::Point, "1,2");
        let items = vec![
            labeled(&p1, "LINE A", Some("A2 BOUNDARY"), 1),
            labeled(&p2, "LINE A", None, 2),
            labeled(&p3, "LINE A", Some("A1 BOUNDARY"), 3),
        ];

        let hierarchy = build_hierarchy(&index(), &items, OutputShape::BoundaryNested, "POLE");
        let groups: Vec<_> = hierarchy.zones[0]
            .groups
            .iter()
            .map(|g| (g.name.as_str(), g.entries.len()))
            .collect();
        assert_eq!(
            groups,
            vec![("A1 BOUNDARY", 1), ("A2 BOUNDARY", 1), ("POLE", 1)]
        );
        assert!(hierarchy.zones[1].groups.is_empty());
    }

    #[test]
    fn snapshot_carries_properties() {
        let p1 = Node::placemark("P1", GeometryKind::Point, "1,2")
            .with_property("styleUrl", "#pole");
        let items = vec![labeled(&p1, "LINE B", None, 1)];
        let hierarchy = build_hierarchy(&index(), &items, OutputShape::Flat, "POLE");

        let json = serde_json::to_value(hierarchy.snapshot()).unwrap();
        let asset = &json["zones"][1]["groups"][0]["assets"][0];
        assert_eq!(asset["label"], "N1");
        assert_eq!(asset["rule"], "boundary");
        assert_eq!(asset["properties"]["styleUrl"], "#pole");
        assert_eq!(asset["longitude"], 1.0);
    }
}
