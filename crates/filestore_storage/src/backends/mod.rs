//! Storage backend implementations.
//!
//! Every backend is crate-private and reached through [`crate::Dispatcher`].

mod cmis;
mod document_store;
mod google_drive;
mod json;
mod local;
mod url;

pub(crate) use cmis::CmisStorage;
pub(crate) use document_store::DocumentStoreStorage;
pub(crate) use google_drive::DriveStorage;
pub(crate) use json::JsonStorage;
pub(crate) use local::LocalStorage;
pub(crate) use url::UrlStorage;

use filestore_core::{FileVariable, FileVariableReference, StorageDefinition, mime_type_from_name};
use filestore_error::{BackendError, BackendErrorKind, FilestoreError, FilestoreResult};

pub(crate) const TO_STORAGE: &str = "to_storage";
pub(crate) const FROM_STORAGE: &str = "from_storage";
pub(crate) const PURGE_STORAGE: &str = "purge_storage";

/// Attach backend and operation to a collaborator failure.
pub(crate) fn failure(
    backend: &'static str,
    operation: &'static str,
) -> impl FnOnce(BackendErrorKind) -> FilestoreError {
    move |kind| BackendError::new(backend, operation, kind).into()
}

/// The plain content token of `reference`, or an invalid-token failure.
pub(crate) fn content_key<'a>(
    backend: &'static str,
    operation: &'static str,
    reference: &'a FileVariableReference,
) -> FilestoreResult<&'a str> {
    reference
        .content()
        .as_ref()
        .and_then(|content| content.as_key())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            BackendError::new(
                backend,
                operation,
                BackendErrorKind::InvalidToken("expected a non-empty content key".to_string()),
            )
            .into()
        })
}

/// Build the variable a backend hands back from a load, inferring the mime
/// type from the name when the backend did not report one.
pub(crate) fn loaded_variable(
    definition: &StorageDefinition,
    name: String,
    mime_type: Option<String>,
    value: Vec<u8>,
) -> FileVariable {
    let mime_type = mime_type.or_else(|| mime_type_from_name(&name));
    let variable = FileVariable::bound_to(definition.clone())
        .with_name(name)
        .with_value(value);
    match mime_type {
        Some(mime_type) => variable.with_mime_type(mime_type),
        None => variable,
    }
}
