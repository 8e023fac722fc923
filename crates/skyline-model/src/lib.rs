// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Skyline Model - Shared types and configuration for procedural cities
//!
//! This crate holds the plain data the generators consume: renderer handles,
//! ground-plane rectangles, neighborhood profiles, and the serde-backed
//! configuration tree. It has no geometry dependencies, so tools can load and
//! edit city descriptions without pulling in the mesh pipeline.
//!
//! # Example
//!
//! ```
//! use skyline_model::{CityConfig, SubdivisionStrategy};
//!
//! let config = CityConfig::from_json_str(r#"{ "width": 150.0 }"#)?;
//! assert_eq!(config.subdivision.strategy, SubdivisionStrategy::Neighborhood);
//! # Ok::<(), skyline_model::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod profile;
pub mod types;

// Re-export all public types
pub use config::*;
pub use error::{ConfigError, Result};
pub use profile::*;
pub use types::*;
