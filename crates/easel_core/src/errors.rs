//! Error Types
//!
//! This module defines the error type shared by every Easel crate.
//!
//! # Overview
//!
//! The main error type [`EaselError`] covers:
//! - Invalid arguments passed to the canvas facade (e.g. geometry arity)
//! - Backend operations that are not implemented or not supported
//! - Operations attempted on a canvas that has not been realized yet
//! - Malformed event payload construction arguments
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, EaselError>`.
//!
//! ```rust,ignore
//! use easel_core::errors::{EaselError, Result};
//!
//! fn resize(canvas: &mut Canvas) -> Result<()> {
//!     canvas.resize(800, 600)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for Easel.
#[derive(Error, Debug)]
pub enum EaselError {
    // ========================================================================
    // Facade Errors
    // ========================================================================
    /// An argument passed to the facade has the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The canvas has no backend yet; call `create_widget()` first.
    #[error("Canvas is not yet realized (attempted `{operation}`)")]
    NotRealized {
        /// The facade operation that required a backend
        operation: &'static str,
    },

    /// No application was passed to the canvas and no default is installed.
    #[error("No default application has been installed")]
    NoDefaultApplication,

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// The backend does not implement this operation.
    #[error("Backend `{backend}` does not implement `{operation}`")]
    NotImplemented {
        /// Name of the backend
        backend: &'static str,
        /// The missing operation
        operation: &'static str,
    },

    /// The backend implements the operation but the surface cannot honor it
    /// (e.g. moving an embedded widget).
    #[error("Backend `{backend}` does not support `{operation}` for this surface")]
    Unsupported {
        /// Name of the backend
        backend: &'static str,
        /// The rejected operation
        operation: &'static str,
    },

    /// Toolkit-specific failure reported by a backend.
    #[error("Backend error: {0}")]
    Backend(String),

    // ========================================================================
    // Event Payload Errors
    // ========================================================================
    /// A tuple-valued field had the wrong number of elements.
    #[error("`{field}` requires {expected} values, got {found}")]
    Arity {
        /// Name of the field
        field: &'static str,
        /// Expected element count
        expected: usize,
        /// Supplied element count
        found: usize,
    },

    /// A field value could not be coerced to its declared type.
    #[error("`{field}` expects {expected}, got {found}")]
    Coercion {
        /// Name of the field
        field: &'static str,
        /// Description of the declared type
        expected: &'static str,
        /// Description of the supplied value
        found: String,
    },

    /// A channel name that is not one of the fixed canvas channels.
    #[error("Unknown event channel: {0}")]
    UnknownChannel(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Canvas configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EaselError {
    /// Shorthand for [`EaselError::NotImplemented`].
    #[must_use]
    pub fn not_implemented(backend: &'static str, operation: &'static str) -> Self {
        Self::NotImplemented { backend, operation }
    }

    /// Shorthand for [`EaselError::Unsupported`].
    #[must_use]
    pub fn unsupported(backend: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { backend, operation }
    }
}

/// Alias for `Result<T, EaselError>`.
pub type Result<T> = std::result::Result<T, EaselError>;
