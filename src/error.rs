//! Error types for the swapchain override core
//!
//! This module defines the error types used throughout the crate, covering
//! backend failures, proxy resource creation, and lifecycle bookkeeping.

use std::fmt;

/// Result type for swapchain override operations
pub type Result<T> = std::result::Result<T, Error>;

/// Swapchain override errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (D3D, Vulkan, OpenGL)
    BackendError(String),

    /// GPU object creation failed (proxy texture, view, sampler, pipeline)
    CreationFailed(String),

    /// Invalid resource or handle (unknown texture, stale view, null handle)
    InvalidResource(String),

    /// Lifecycle bookkeeping mismatch (event out of order, missing registry
    /// entry where one was required)
    LifecycleMismatch(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::CreationFailed(msg) => write!(f, "Creation failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::LifecycleMismatch(msg) => write!(f, "Lifecycle mismatch: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and construct the corresponding Error value
///
/// The variant is given by name, the message is formatted and used both for
/// the log entry and for the error payload.
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::error::Error::$variant(message)
    }};
}

/// Log an ERROR message and early-return it as Err from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
