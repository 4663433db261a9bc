// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone classification
//!
//! Each asset is tested against every zone before a choice is made, so the
//! outcome never depends on iteration order:
//!
//! 1. **Reference path**: among zones whose reference path lies within the
//!    threshold, the nearest wins. Exact ties go to the zone that sorts first.
//! 2. **Boundary**: otherwise, zones with a label-matching boundary that
//!    strictly contains the point qualify. Several qualifying zones resolve to
//!    the first in name order and are reported as ambiguous.
//! 3. **Nearest boundary exterior** (opt-in): otherwise, the zone owning the
//!    label-matching boundary whose edge is nearest.
//!
//! Anything left over is unassigned and reported.

use poleline_geometry::{degrees_to_meters, PathLocation, Point2};
use serde::Serialize;

use crate::assets::Asset;
use crate::config::UnassignedFallback;
use crate::diagnostics::Diagnostic;
use crate::zone_index::{ZoneDefinition, ZoneIndex};

/// Rule that produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchRule {
    ReferencePath,
    Boundary,
    NearestBoundaryExterior,
}

/// An asset placed in a zone.
#[derive(Debug)]
pub struct Assignment<'a, T> {
    pub asset: Asset<'a, T>,
    pub zone: String,
    /// Within-zone sort key: arc position along the reference path in
    /// degrees for [`MatchRule::ReferencePath`], longitude otherwise.
    pub ordering_key: f64,
    pub rule: MatchRule,
    /// First label-matching boundary of the zone that contains the asset.
    pub boundary: Option<String>,
}

/// Result of classifying a batch of assets.
///
/// Every input asset ends up in exactly one of `assignments` or `unassigned`.
#[derive(Debug)]
pub struct Classification<'a, T> {
    pub assignments: Vec<Assignment<'a, T>>,
    pub unassigned: Vec<Asset<'a, T>>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Decision<'z> {
    zone: &'z ZoneDefinition,
    ordering_key: f64,
    rule: MatchRule,
}

/// Classify assets against the zone index.
pub fn classify<'a, T>(
    assets: Vec<Asset<'a, T>>,
    index: &ZoneIndex,
    threshold_meters: f64,
    fallback: UnassignedFallback,
) -> Classification<'a, T> {
    let mut assignments = Vec::with_capacity(assets.len());
    let mut unassigned = Vec::new();
    let mut diagnostics = Vec::new();

    for asset in assets {
        let point = asset.point;

        let decision = nearest_reference_path(&point, index, threshold_meters)
            .map(|(zone, location)| Decision {
                zone,
                ordering_key: location.along,
                rule: MatchRule::ReferencePath,
            })
            .or_else(|| {
                let containing: Vec<&ZoneDefinition> = index
                    .zones()
                    .filter(|zone| zone.containing_boundary(&point).is_some())
                    .collect();
                let chosen = *containing.first()?;
                if containing.len() > 1 {
                    diagnostics.push(Diagnostic::AmbiguousAssignment {
                        asset: asset.label.clone(),
                        candidates: containing.iter().map(|z| z.name.clone()).collect(),
                        chosen: chosen.name.clone(),
                    });
                }
                Some(Decision {
                    zone: chosen,
                    ordering_key: point.x,
                    rule: MatchRule::Boundary,
                })
            })
            .or_else(|| match fallback {
                UnassignedFallback::None => None,
                UnassignedFallback::NearestBoundaryExterior => {
                    nearest_boundary_exterior(&point, index).map(|zone| Decision {
                        zone,
                        ordering_key: point.x,
                        rule: MatchRule::NearestBoundaryExterior,
                    })
                }
            });

        match decision {
            Some(decision) => {
                tracing::trace!(
                    asset = %asset.label,
                    zone = %decision.zone.name,
                    rule = ?decision.rule,
                    "Assigned asset"
                );
                assignments.push(Assignment {
                    zone: decision.zone.name.clone(),
                    ordering_key: decision.ordering_key,
                    rule: decision.rule,
                    boundary: decision.zone.containing_boundary(&point).map(str::to_owned),
                    asset,
                });
            }
            None => {
                diagnostics.push(Diagnostic::UnassignedAsset {
                    asset: asset.label.clone(),
                    lon: point.x,
                    lat: point.y,
                });
                unassigned.push(asset);
            }
        }
    }

    tracing::debug!(
        assigned = assignments.len(),
        unassigned = unassigned.len(),
        threshold_meters,
        "Classified assets"
    );

    Classification {
        assignments,
        unassigned,
        diagnostics,
    }
}

/// Nearest zone whose reference path is within the threshold.
fn nearest_reference_path<'z>(
    point: &Point2<f64>,
    index: &'z ZoneIndex,
    threshold_meters: f64,
) -> Option<(&'z ZoneDefinition, PathLocation)> {
    index
        .zones()
        .filter_map(|zone| {
            let location = zone.reference_path.as_ref()?.locate(point);
            (degrees_to_meters(location.distance) <= threshold_meters).then_some((zone, location))
        })
        .fold(None, |best, candidate| match best {
            Some(best) if best.1.distance <= candidate.1.distance => Some(best),
            _ => Some(candidate),
        })
}

/// Zone owning the label-matching boundary with the nearest edge.
fn nearest_boundary_exterior<'z>(
    point: &Point2<f64>,
    index: &'z ZoneIndex,
) -> Option<&'z ZoneDefinition> {
    index
        .zones()
        .flat_map(|zone| {
            zone.matching_boundaries()
                .map(move |(_, region)| (zone, region.exterior_distance(point)))
        })
        .fold(None, |best: Option<(&ZoneDefinition, f64)>, candidate| match best {
            Some(best) if best.1 <= candidate.1 => Some(best),
            _ => Some(candidate),
        })
        .map(|(zone, _)| zone)
}
