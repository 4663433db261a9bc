use poleline_core::GeometryKind;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or constructing geometry
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinate text: {0}")]
    Coordinates(#[from] poleline_core::Error),

    #[error("{kind:?} expects {expected} coordinate tuples, found {found}")]
    TupleCount {
        kind: GeometryKind,
        expected: &'static str,
        found: usize,
    },

    #[error("Path needs at least 2 vertices, found {0}")]
    DegeneratePath(usize),

    #[error("Region needs at least 3 distinct vertices enclosing an area, found {0}")]
    DegenerateRegion(usize),
}
