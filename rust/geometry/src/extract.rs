// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record geometry extraction
//!
//! Turns a normalized record's geometry marker and coordinate text into a
//! typed [`Geometry`]. A record without geometry, or with blank coordinate
//! text, has no geometry; malformed text is an error for that record only.

use nalgebra::Point2;
use poleline_core::{parse_coordinates, Coordinate, DocumentTree, GeometryKind};

use crate::error::{Error, Result};
use crate::shapes::{Geometry, Path, Region};

#[inline]
fn to_point(c: &Coordinate) -> Point2<f64> {
    Point2::new(c.lon, c.lat)
}

/// Decode the geometry of a single record.
pub fn extract_geometry<T: DocumentTree>(record: &T) -> Result<Option<Geometry>> {
    let raw = match record.raw_geometry() {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let coords = parse_coordinates(&raw.coordinates)?;
    if coords.is_empty() {
        return Ok(None);
    }

    let geometry = match raw.kind {
        GeometryKind::Point => {
            if coords.len() != 1 {
                return Err(Error::TupleCount {
                    kind: raw.kind,
                    expected: "exactly 1",
                    found: coords.len(),
                });
            }
            Geometry::Point(to_point(&coords[0]))
        }
        GeometryKind::LineString => {
            if coords.len() < 2 {
                return Err(Error::TupleCount {
                    kind: raw.kind,
                    expected: "at least 2",
                    found: coords.len(),
                });
            }
            Geometry::Path(Path::new(coords.iter().map(to_point).collect())?)
        }
        GeometryKind::Polygon => {
            if coords.len() < 3 {
                return Err(Error::TupleCount {
                    kind: raw.kind,
                    expected: "at least 3",
                    found: coords.len(),
                });
            }
            Geometry::Region(Region::new(coords.iter().map(to_point).collect())?)
        }
    };

    Ok(Some(geometry))
}
