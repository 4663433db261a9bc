// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Poleline Engine
//!
//! Assigns point assets (poles) to named zones (lines) and renumbers them
//! with one global, zero-padded counter.
//!
//! ## Pipeline
//!
//! 1. [`ZoneIndex::build`] reads each zone's reference path and boundaries
//! 2. [`collect_assets`] gathers the point records of asset folders
//! 3. [`classify`] applies the reference path rule, then the boundary rule
//! 4. [`renumber`] sorts by (zone, ordering key) and folds the counter
//! 5. [`build_hierarchy`] regroups the result per zone
//!
//! [`run`] chains all of them and collects the [`Diagnostic`]s.
//!
//! ```rust,ignore
//! use poleline_core::Node;
//! use poleline_engine::{run, ZoningConfig};
//!
//! let doc = Node::from_json(&json)?;
//! let config = ZoningConfig { prefix: "MR.OATKRP.P".into(), ..Default::default() };
//! let output = run(&doc, &config)?;
//! for row in &output.audit {
//!     println!("{} {} -> {}", row.zone, row.original_label, row.new_label);
//! }
//! ```

pub mod assets;
pub mod audit;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod renumber;
pub mod zone_index;

pub use assets::{collect_assets, Asset, UNNAMED_LABEL};
pub use audit::{audit_rows, unassigned_rows, AuditRow, UnassignedRow};
pub use builder::{
    build_hierarchy, AssetGroup, Entry, Hierarchy, HierarchySnapshot, ZoneGroup,
};
pub use classifier::{classify, Assignment, Classification, MatchRule};
pub use config::{
    Markers, OutputShape, UnassignedFallback, ZoningConfig, DEFAULT_PAD_WIDTH,
    DEFAULT_THRESHOLD_METERS,
};
pub use diagnostics::Diagnostic;
pub use error::{ConfigurationError, Error, Result};
pub use pipeline::{run, RunOutput};
pub use renumber::{format_label, label_capacity, renumber, Labeled};
pub use zone_index::{ZoneDefinition, ZoneIndex};
