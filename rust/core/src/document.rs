// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized document tree
//!
//! The upstream normalizer hands over a clean tree of documents, folders and
//! placemarks with namespaces already stripped. Everything downstream walks
//! it through [`DocumentTree`], so the concrete representation stays private
//! to this module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Folder,
    Placemark,
}

/// Geometry marker carried by a placemark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    /// Outer boundary ring of a polygon (closed).
    Polygon,
}

/// Undecoded geometry: a marker plus its coordinate text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    pub kind: GeometryKind,
    #[serde(default)]
    pub coordinates: String,
}

/// A node of the normalized tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RawGeometry>,
    /// Remaining record fields (description, styleUrl, ...) carried verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Parse a normalized tree from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create a document root.
    pub fn document(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Document,
            name: None,
            geometry: None,
            properties: BTreeMap::new(),
            children,
        }
    }

    /// Create a named folder.
    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Folder,
            name: Some(name.into()),
            geometry: None,
            properties: BTreeMap::new(),
            children,
        }
    }

    /// Create a placemark with geometry.
    pub fn placemark(
        name: impl Into<String>,
        kind: GeometryKind,
        coordinates: impl Into<String>,
    ) -> Self {
        Self {
            kind: NodeKind::Placemark,
            name: Some(name.into()),
            geometry: Some(RawGeometry {
                kind,
                coordinates: coordinates.into(),
            }),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Attach a carried property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Read-only capability interface over a normalized tree.
///
/// Name lookups compare trimmed names ASCII case-insensitively.
pub trait DocumentTree: Sized {
    /// The node's display name, if any.
    fn logical_name(&self) -> Option<&str>;

    fn node_kind(&self) -> NodeKind;

    fn child_nodes(&self) -> &[Self];

    fn raw_geometry(&self) -> Option<&RawGeometry>;

    /// Carried record properties, in key order.
    fn record_properties(&self) -> Vec<(&str, &str)>;

    fn has_name(&self, name: &str) -> bool {
        self.logical_name()
            .map(|n| n.trim().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(false)
    }

    /// First direct child with the given name.
    fn find_child(&self, name: &str) -> Option<&Self> {
        self.child_nodes().iter().find(|c| c.has_name(name))
    }

    /// First descendant (pre-order) with the given name.
    fn find_descendant(&self, name: &str) -> Option<&Self> {
        self.descendants().find(|n| n.has_name(name))
    }

    /// Pre-order walk over every descendant, excluding `self`.
    fn descendants(&self) -> Descendants<'_, Self> {
        Descendants::new(self)
    }

    /// Descendant placemarks in document order.
    fn records(&self) -> Vec<&Self> {
        self.descendants()
            .filter(|n| n.node_kind() == NodeKind::Placemark)
            .collect()
    }
}

impl DocumentTree for Node {
    fn logical_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn node_kind(&self) -> NodeKind {
        self.kind
    }

    fn child_nodes(&self) -> &[Self] {
        &self.children
    }

    fn raw_geometry(&self) -> Option<&RawGeometry> {
        self.geometry.as_ref()
    }

    fn record_properties(&self) -> Vec<(&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Pre-order iterator returned by [`DocumentTree::descendants`].
pub struct Descendants<'a, T> {
    stack: Vec<&'a T>,
}

impl<'a, T: DocumentTree> Descendants<'a, T> {
    fn new(root: &'a T) -> Self {
        Self {
            stack: root.child_nodes().iter().rev().collect(),
        }
    }
}

impl<'a, T: DocumentTree> Iterator for Descendants<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::document(vec![
            Node::folder(
                "LINE A",
                vec![
                    Node::placemark("DISTRIBUTION CABLE A", GeometryKind::LineString, "0,0 1,1"),
                    Node::folder(
                        "POLE",
                        vec![Node::placemark("P1", GeometryKind::Point, "0.5,0.5")],
                    ),
                ],
            ),
            Node::folder(
                "pole",
                vec![Node::placemark("P2", GeometryKind::Point, "2,2")],
            ),
        ])
    }

    #[test]
    fn descendants_are_pre_order() {
        let doc = sample();
        let names: Vec<_> = doc
            .descendants()
            .filter_map(|n| n.logical_name())
            .collect();
        assert_eq!(
            names,
            vec!["LINE A", "DISTRIBUTION CABLE A", "POLE", "P1", "pole", "P2"]
        );
    }

    #[test]
    fn find_child_is_case_insensitive_and_shallow() {
        let doc = sample();
        assert!(doc.find_child("line a").is_some());
        // P1 is nested, not a direct child
        assert!(doc.find_child("P1").is_none());
        assert!(doc.find_descendant(" p1 ").is_some());
    }

    #[test]
    fn records_collects_placemarks_in_order() {
        let doc = sample();
        let names: Vec<_> = doc
            .records()
            .into_iter()
            .filter_map(|n| n.logical_name())
            .collect();
        assert_eq!(names, vec!["DISTRIBUTION CABLE A", "P1", "P2"]);
    }

    #[test]
    fn json_round_trip_keeps_properties() {
        let json = r#"{
            "kind": "Document",
            "children": [
                {
                    "kind": "Placemark",
                    "name": "P9",
                    "geometry": { "kind": "Point", "coordinates": "106.1,-6.2,0" },
                    "properties": { "description": "steel pole 9m" }
                }
            ]
        }"#;
        let doc = Node::from_json(json).unwrap();
        let record = &doc.children[0];
        assert_eq!(record.kind, NodeKind::Placemark);
        assert_eq!(
            record.record_properties(),
            vec![("description", "steel pole 9m")]
        );
        let again = Node::from_json(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Node::from_json("{\"kind\": \"Nope\"}").is_err());
    }
}
