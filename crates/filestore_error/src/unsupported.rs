//! Unsupported operation and unsupported backend errors.

/// A backend was asked for a direction it does not support.
///
/// # Examples
///
/// ```
/// use filestore_error::UnsupportedOperationError;
///
/// let err = UnsupportedOperationError::new("URL", "to_storage");
/// assert!(format!("{}", err).contains("URL"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Unsupported Operation: backend {} does not support {} at line {} in {}",
    backend,
    operation,
    line,
    file
)]
pub struct UnsupportedOperationError {
    /// Backend that refused the operation
    pub backend: String,
    /// The refused operation
    pub operation: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl UnsupportedOperationError {
    /// Create a new UnsupportedOperationError at the current location.
    #[track_caller]
    pub fn new(backend: impl Into<String>, operation: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            backend: backend.into(),
            operation: operation.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

/// The dispatcher could not build a backend because a collaborator it needs
/// was not supplied in the invocation context.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Unsupported Backend: {} needs {} at line {} in {}",
    backend,
    missing,
    line,
    file
)]
pub struct UnsupportedBackendError {
    /// Backend that could not be constructed
    pub backend: String,
    /// Name of the missing collaborator
    pub missing: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl UnsupportedBackendError {
    /// Create a new UnsupportedBackendError at the current location.
    #[track_caller]
    pub fn new(backend: impl Into<String>, missing: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            backend: backend.into(),
            missing: missing.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
