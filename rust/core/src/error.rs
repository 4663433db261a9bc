// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document loading and coordinate parsing.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a normalized document or its coordinate text.
#[derive(Debug, Error)]
pub enum Error {
    /// A coordinate component is not a number.
    #[error("invalid coordinate number '{token}'")]
    InvalidNumber { token: String },

    /// A tuple must hold longitude, latitude and an optional altitude.
    #[error("coordinate tuple '{tuple}' has {count} components, expected 2 or 3")]
    TupleArity { tuple: String, count: usize },

    /// The coordinate text contains something that is not a tuple list.
    #[error("unexpected coordinate text near '{0}'")]
    UnexpectedInput(String),

    /// A component parsed to NaN or infinity.
    #[error("coordinate value is not finite: '{0}'")]
    NonFinite(String),

    /// The document tree could not be deserialized.
    #[error("document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
