//! Poleline Geometry
//!
//! Typed point, path and region geometry for zone classification, using
//! nalgebra for planar math on longitude/latitude degrees.

pub mod error;
pub mod extract;
mod measure;
pub mod shapes;
pub mod units;

// Re-export nalgebra types for convenience
pub use nalgebra::Point2;

pub use error::{Error, Result};
pub use extract::extract_geometry;
pub use shapes::{Geometry, Path, PathLocation, Region, COINCIDENT_EPSILON};
pub use units::{degrees_to_meters, meters_to_degrees, METERS_PER_DEGREE};
