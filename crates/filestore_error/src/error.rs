//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, DefinitionError, MissingInputError, ReferenceError,
    UnsupportedBackendError, UnsupportedOperationError,
};

/// Every failure the filestore crates can report.
///
/// # Examples
///
/// ```
/// use filestore_error::{FilestoreError, UnsupportedOperationError};
///
/// let err: FilestoreError = UnsupportedOperationError::new("URL", "to_storage").into();
/// assert!(format!("{}", err).contains("Unsupported Operation"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FilestoreErrorKind {
    /// Storage definition does not decode
    #[from(DefinitionError)]
    Definition(DefinitionError),
    /// Reference (de)serialization failure
    #[from(ReferenceError)]
    Reference(ReferenceError),
    /// Backend does not support the requested direction
    #[from(UnsupportedOperationError)]
    UnsupportedOperation(UnsupportedOperationError),
    /// Backend cannot be built without a missing collaborator
    #[from(UnsupportedBackendError)]
    UnsupportedBackend(UnsupportedBackendError),
    /// Required input is absent
    #[from(MissingInputError)]
    MissingInput(MissingInputError),
    /// Lower-level I/O, network or authentication failure
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Filestore error with kind discrimination.
///
/// # Examples
///
/// ```
/// use filestore_error::{FilestoreError, FilestoreErrorKind, FilestoreResult, MissingInputError};
///
/// fn might_fail() -> FilestoreResult<()> {
///     Err(MissingInputError::new("reference"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FilestoreErrorKind::MissingInput(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Filestore Error: {}", _0)]
pub struct FilestoreError(Box<FilestoreErrorKind>);

impl FilestoreError {
    /// Create a new error from a kind.
    pub fn new(kind: FilestoreErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FilestoreErrorKind {
        &self.0
    }

    /// Backend the failure originated from, if a backend was involved.
    pub fn backend(&self) -> Option<&str> {
        match self.kind() {
            FilestoreErrorKind::Backend(e) => Some(e.backend()),
            FilestoreErrorKind::UnsupportedOperation(e) => Some(&e.backend),
            FilestoreErrorKind::UnsupportedBackend(e) => Some(&e.backend),
            FilestoreErrorKind::Definition(_)
            | FilestoreErrorKind::Reference(_)
            | FilestoreErrorKind::MissingInput(_)
            | FilestoreErrorKind::Config(_) => None,
        }
    }
}

// Generic From implementation for any type that converts to FilestoreErrorKind
impl<T> From<T> for FilestoreError
where
    T: Into<FilestoreErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for filestore operations.
pub type FilestoreResult<T> = std::result::Result<T, FilestoreError>;
