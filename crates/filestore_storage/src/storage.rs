//! Storage trait definition.

use filestore_core::{FileVariable, FileVariableReference, StorageType};
use filestore_error::FilestoreResult;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// The capability every storage backend implements.
///
/// The set of backends is closed: implementations live in this crate and
/// are only constructed by [`crate::Dispatcher`].
pub trait Storage: sealed::Sealed + Send + Sync {
    /// Backend name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Storage type this backend serves.
    fn storage_type(&self) -> StorageType;

    /// Persist the variable's bytes and metadata.
    ///
    /// The returned reference's content token is enough to retrieve the
    /// artifact later. Read-only backends fail with an unsupported
    /// operation error.
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference>;

    /// Rebuild name, mime type and bytes from a reference.
    ///
    /// When the backend does not keep the mime type, it is inferred from
    /// the name suffix.
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable>;

    /// Delete the artifact.
    ///
    /// Purging an artifact that is already gone returns `true`.
    fn purge_storage(&self, reference: &FileVariableReference) -> FilestoreResult<bool>;
}
