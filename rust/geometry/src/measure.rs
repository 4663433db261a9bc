// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar measurement primitives on 2D contours

use nalgebra::Point2;

/// Nearest point on a segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentHit {
    /// Distance from the query point to the segment
    pub distance: f64,
    /// Distance from the segment start to the nearest point
    pub offset: f64,
    /// Segment length
    pub length: f64,
}

/// Find the point of segment `a`-`b` nearest to `p`.
pub(crate) fn closest_on_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> SegmentHit {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return SegmentHit {
            distance: (p - a).norm(),
            offset: 0.0,
            length: 0.0,
        };
    }

    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    let length = len_sq.sqrt();

    SegmentHit {
        distance: (p - closest).norm(),
        offset: t * length,
        length,
    }
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub(crate) fn signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y - contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Even-odd ray casting. Boundary handling is left to the caller.
pub(crate) fn ray_cast(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = contour.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &contour[i];
        let pj = &contour[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Compute bounding box of a contour
pub(crate) fn bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let first = *contour.first()?;
    let mut min = first;
    let mut max = first;

    for p in contour.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}
