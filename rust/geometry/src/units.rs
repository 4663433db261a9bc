// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Degree/meter conversion
//!
//! Coordinates stay in decimal degrees throughout. Distances are converted
//! with a fixed small-angle factor (one degree of arc on the equator). This
//! is an approximation that degrades away from the equator and along the
//! longitude axis; it is not a geodesic distance.

/// Meters per degree of arc used for every distance conversion.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Convert an angular distance in degrees to meters.
#[inline]
pub fn degrees_to_meters(degrees: f64) -> f64 {
    degrees * METERS_PER_DEGREE
}

/// Convert a distance in meters to degrees.
#[inline]
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}
