// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for city generation

use thiserror::Error;

/// City generation result type
pub type Result<T> = std::result::Result<T, Error>;

/// City generation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Mesh generation failed
    #[error("Geometry error: {0}")]
    Geometry(#[from] skyline_geometry::Error),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] skyline_model::ConfigError),

    /// Decoration kind with no registered generator
    #[error("Unknown decoration kind: {0}")]
    UnknownDecoration(String),
}

impl Error {
    /// Create an unknown decoration error
    pub fn unknown_decoration(kind: impl Into<String>) -> Self {
        Error::UnknownDecoration(kind.into())
    }
}
