// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed geometries decoded from records
//!
//! Points use nalgebra's `Point2<f64>` with `x` = longitude and
//! `y` = latitude, both in decimal degrees.

use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::measure;

/// Vertices closer than this (in degrees) are treated as coincident.
pub const COINCIDENT_EPSILON: f64 = 1e-12;

/// Nearest-point query result against a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLocation {
    /// Distance from the query point to the path, in degrees.
    pub distance: f64,
    /// Arc length from the first vertex to the nearest point, in degrees.
    pub along: f64,
}

/// An ordered polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<Point2<f64>>,
}

impl Path {
    /// Create a path. At least two vertices are required.
    pub fn new(vertices: Vec<Point2<f64>>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(Error::DegeneratePath(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Total length in degrees.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Locate the nearest point of the path to `point`.
    ///
    /// When several segments are equally near, the one closest to the start
    /// of the path wins, so `along` is the smallest such position.
    pub fn locate(&self, point: &Point2<f64>) -> PathLocation {
        let mut best = PathLocation {
            distance: f64::INFINITY,
            along: 0.0,
        };
        let mut walked = 0.0;

        for w in self.vertices.windows(2) {
            let seg = measure::closest_on_segment(point, &w[0], &w[1]);
            if seg.distance < best.distance {
                best = PathLocation {
                    distance: seg.distance,
                    along: walked + seg.offset,
                };
            }
            walked += seg.length;
        }

        best
    }
}

/// A closed polygon given by its outer ring.
///
/// The ring is stored open (the closing vertex is not repeated).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    ring: Vec<Point2<f64>>,
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Region {
    /// Create a region from its boundary vertices.
    ///
    /// A repeated closing vertex is dropped. The remaining ring needs three
    /// or more vertices and a non-zero area.
    pub fn new(mut ring: Vec<Point2<f64>>) -> Result<Self> {
        if ring.len() > 1 {
            let first = ring[0];
            let last = ring[ring.len() - 1];
            if (last - first).norm() <= COINCIDENT_EPSILON {
                ring.pop();
            }
        }

        if ring.len() < 3 || measure::signed_area(&ring).abs() <= COINCIDENT_EPSILON {
            return Err(Error::DegenerateRegion(ring.len()));
        }

        let (min, max) = measure::bounds(&ring).ok_or(Error::DegenerateRegion(0))?;
        Ok(Self { ring, min, max })
    }

    pub fn ring(&self) -> &[Point2<f64>] {
        &self.ring
    }

    /// True if `point` lies strictly inside the region.
    ///
    /// Points on an edge or vertex are outside.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        if point.x <= self.min.x
            || point.x >= self.max.x
            || point.y <= self.min.y
            || point.y >= self.max.y
        {
            return false;
        }
        if self.exterior_distance(point) <= COINCIDENT_EPSILON {
            return false;
        }
        measure::ray_cast(point, &self.ring)
    }

    /// Distance from `point` to the nearest edge of the ring, in degrees.
    ///
    /// Measured to the boundary line itself, so it is positive both inside
    /// and outside the region.
    pub fn exterior_distance(&self, point: &Point2<f64>) -> f64 {
        let n = self.ring.len();
        (0..n)
            .map(|i| {
                measure::closest_on_segment(point, &self.ring[i], &self.ring[(i + 1) % n])
                    .distance
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// A decoded record geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point2<f64>),
    Path(Path),
    Region(Region),
}

impl Geometry {
    pub fn as_point(&self) -> Option<&Point2<f64>> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Geometry::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_region(&self) -> Option<&Region> {
        match self {
            Geometry::Region(r) => Some(r),
            _ => None,
        }
    }
}
