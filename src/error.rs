//! Error types for integral drivers.
//!
//! Every failure a driver can report falls into one of four categories:
//! configuration validation, backend resolution, molecule parsing, and the
//! backend computation itself. None of them are retried or suppressed
//! inside the crate.

use thiserror::Error;

/// Errors raised while configuring or running an integral driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A configuration option violates the driver's input schema.
    #[error("invalid configuration option '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// The external integral engine cannot be resolved in this environment.
    #[error("{backend} backend is unavailable: {hint}")]
    BackendUnavailable { backend: &'static str, hint: String },

    /// The `atoms` string cannot be decomposed into atom/coordinate tuples.
    #[error("molecule format error in '{entry}': {reason}")]
    Parse { entry: String, reason: String },

    /// The backend ran but failed (e.g. SCF non-convergence, bad output).
    #[error("electronic structure computation failed: {message}")]
    Computation { message: String },
}

impl DriverError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DriverError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        DriverError::Parse {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        DriverError::Computation {
            message: message.into(),
        }
    }

    pub fn unavailable(backend: &'static str, hint: impl Into<String>) -> Self {
        DriverError::BackendUnavailable {
            backend,
            hint: hint.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
