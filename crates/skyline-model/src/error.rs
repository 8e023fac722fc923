// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for configuration loading and validation

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value the generators cannot work with
    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for `InvalidValue` errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { field, .. } => Some(field),
            ConfigError::Json(_) => None,
        }
    }
}

/// Fail unless `value` is finite and strictly positive
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

/// Fail unless `value` lies in `[min, max]`
pub(crate) fn ensure_within(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be within [{min}, {max}], got {value}"),
        ))
    }
}

/// Fail unless `min <= max`
pub(crate) fn ensure_ordered<T: PartialOrd + std::fmt::Display>(
    field: &str,
    min: T,
    max: T,
) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("minimum {min} exceeds maximum {max}"),
        ))
    }
}
