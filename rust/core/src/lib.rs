// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Poleline Core
//!
//! Normalized geo-document tree and coordinate text parsing.
//!
//! ## Overview
//!
//! - **Document tree**: serde model of the normalized input (documents,
//!   folders, placemarks) behind the [`DocumentTree`] capability trait
//! - **Coordinate parsing**: [nom](https://docs.rs/nom) tokenization of
//!   `lon,lat[,alt]` tuple lists with [fast-float](https://docs.rs/fast-float)
//!   number conversion
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use poleline_core::{parse_coordinates, DocumentTree, Node};
//!
//! let doc = Node::from_json(&std::fs::read_to_string("network.json")?)?;
//! for record in doc.records() {
//!     if let Some(geometry) = record.raw_geometry() {
//!         let coords = parse_coordinates(&geometry.coordinates)?;
//!         println!("{:?}: {} vertices", record.logical_name(), coords.len());
//!     }
//! }
//! ```

pub mod coords;
pub mod document;
pub mod error;

pub use coords::{parse_coordinates, Coordinate};
pub use document::{Descendants, DocumentTree, GeometryKind, Node, NodeKind, RawGeometry};
pub use error::{Error, Result};
