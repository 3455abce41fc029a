//! Error types for the Rampart3D engine
//!
//! This module defines the error types used throughout the engine,
//! including device resource creation, buffer updates, and view setup.

use std::fmt;

/// Result type for Rampart3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Rampart3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error reported by the render device
    BackendError(String),

    /// Invalid resource (buffer, texture, video buffer, etc.)
    InvalidResource(String),

    /// A required collaborator or resource is not available
    ResourceUnavailable(String),

    /// Initialization failed (display, view, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ResourceUnavailable(msg) => write!(f, "Resource unavailable: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error::InvalidResource`] from a format string, logging it
/// through the engine logger on the way out.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("rampart3d::Buffer", "index {} out of bounds", 12);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::rampart3d::Error::InvalidResource(message)
    }};
}

/// Return early with an [`Error::InvalidResource`] built from a format string.
///
/// # Example
///
/// ```ignore
/// if desc.element_count == 0 {
///     engine_bail!("rampart3d::Buffer", "buffer must have at least one element");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
