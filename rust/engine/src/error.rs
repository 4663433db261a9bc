// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fatal errors. Everything recoverable is a [`crate::Diagnostic`] instead.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run before any output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Invalid or unsatisfiable configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Labels need at least one digit.
    #[error("pad width must be at least 1, got {0}")]
    PadWidth(usize),

    /// Proximity threshold must be a usable distance.
    #[error("threshold must be a finite, non-negative number of meters, got {0}")]
    Threshold(f64),

    /// A folder/label marker is blank.
    #[error("{0} marker must not be empty")]
    EmptyMarker(&'static str),

    /// More assets than the padded counter can express.
    #[error(
        "{count} assets do not fit in {pad_width} digit labels (maximum {capacity}); increase the pad width"
    )]
    CounterOverflow {
        count: usize,
        pad_width: usize,
        capacity: u64,
    },
}
