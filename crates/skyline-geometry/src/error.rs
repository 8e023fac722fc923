// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry generation

use thiserror::Error;

/// Geometry generation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry generation errors
///
/// All variants are local to a single footprint or mesh. Callers generating
/// many floors are expected to log and skip the failing one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer than three usable points after cleaning
    #[error("Cannot triangulate polygons with less than 3 vertices (got {count})")]
    InsufficientVertices { count: usize },

    /// No ear could be clipped while vertices remained
    #[error("No suitable triangulation found ({remaining} vertices left)")]
    TriangulationFailed { remaining: usize },

    /// Non-finite or otherwise unusable parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Create an insufficient vertices error
    pub fn insufficient_vertices(count: usize) -> Self {
        Error::InsufficientVertices { count }
    }

    /// Create a triangulation failure
    pub fn triangulation_failed(remaining: usize) -> Self {
        Error::TriangulationFailed { remaining }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
