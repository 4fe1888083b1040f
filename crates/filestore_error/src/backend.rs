//! Backend failure types.

/// Lower-level failure a backend ran into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BackendErrorKind {
    /// Artifact not found at the given location
    #[display("Artifact not found: {}", _0)]
    NotFound(String),
    /// Failed to read an artifact
    #[display("Failed to read: {}", _0)]
    Read(String),
    /// Failed to write an artifact
    #[display("Failed to write: {}", _0)]
    Write(String),
    /// Failed to delete an artifact
    #[display("Failed to delete: {}", _0)]
    Delete(String),
    /// Failed to create the storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// The content token cannot be used by this backend
    #[display("Invalid content token: {}", _0)]
    InvalidToken(String),
    /// HTTP transport failure
    #[display("HTTP failure: {}", _0)]
    Http(String),
    /// Could not open a session with the remote system
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// Missing or rejected credentials
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// The remote system reported an error
    #[display("Remote failure: {}", _0)]
    Remote(String),
}

/// Backend failure annotated with backend name and operation.
///
/// # Examples
///
/// ```
/// use filestore_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(
///     "Folder",
///     "from_storage",
///     BackendErrorKind::NotFound("/data/report.pdf".to_string()),
/// );
/// assert_eq!(err.backend(), "Folder");
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Backend Error: [{}::{}] {} at line {} in {}",
    backend,
    operation,
    kind,
    line,
    file
)]
pub struct BackendError {
    backend: String,
    operation: String,
    kind: BackendErrorKind,
    line: u32,
    file: &'static str,
}

impl BackendError {
    /// Create a new backend error with caller location tracking.
    #[track_caller]
    pub fn new(
        backend: impl Into<String>,
        operation: impl Into<String>,
        kind: BackendErrorKind,
    ) -> Self {
        let location = std::panic::Location::caller();
        Self {
            backend: backend.into(),
            operation: operation.into(),
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name of the backend that failed.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Operation that failed (`to_storage`, `from_storage`, `purge_storage`).
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }
}
