//! Workflow engine document-store backend.

use super::{FROM_STORAGE, PURGE_STORAGE, TO_STORAGE, failure, loaded_variable};
use crate::clients::DocumentStoreClient;
use crate::storage::{Storage, sealed};
use filestore_core::{
    DocumentHandle, FileVariable, FileVariableReference, StorageDefinition, StorageType,
};
use filestore_error::{BackendError, BackendErrorKind, FilestoreResult};
use std::sync::Arc;

const NAME: &str = "DocumentStore";

pub(crate) struct DocumentStoreStorage {
    definition: StorageDefinition,
    client: Arc<dyn DocumentStoreClient>,
}

impl DocumentStoreStorage {
    pub(crate) fn new(definition: StorageDefinition, client: Arc<dyn DocumentStoreClient>) -> Self {
        Self { definition, client }
    }
}

fn handle_of<'a>(
    operation: &'static str,
    reference: &'a FileVariableReference,
) -> FilestoreResult<&'a DocumentHandle> {
    reference
        .content()
        .as_ref()
        .and_then(|content| content.as_handle())
        .ok_or_else(|| {
            BackendError::new(
                NAME,
                operation,
                BackendErrorKind::InvalidToken("expected a document handle".to_string()),
            )
            .into()
        })
}

impl sealed::Sealed for DocumentStoreStorage {}

impl Storage for DocumentStoreStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn storage_type(&self) -> StorageType {
        StorageType::DocumentStore
    }

    #[tracing::instrument(skip(self, variable), fields(size = variable.size()))]
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        let content_type = variable.effective_mime_type();
        let handle = self
            .client
            .create(variable.value(), variable.name(), content_type.as_deref())
            .map_err(failure(NAME, TO_STORAGE))?;
        tracing::debug!(document_id = %handle.document_id(), "Created document");
        Ok(FileVariableReference::new(&self.definition, handle))
    }

    #[tracing::instrument(skip_all)]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let handle = handle_of(FROM_STORAGE, reference)?;
        let document = self
            .client
            .resolve(handle)
            .map_err(failure(NAME, FROM_STORAGE))?;

        let metadata = handle.metadata();
        let name = document
            .name
            .or_else(|| metadata.file_name().clone())
            .unwrap_or_else(|| handle.document_id().clone());
        let mime_type = document.mime_type.or_else(|| metadata.content_type().clone());
        Ok(loaded_variable(
            &self.definition,
            name,
            mime_type,
            document.content,
        ))
    }

    #[tracing::instrument(skip_all)]
    fn purge_storage(&self, reference: &FileVariableReference) -> FilestoreResult<bool> {
        let handle = handle_of(PURGE_STORAGE, reference)?;
        match self.client.delete(handle) {
            Ok(deleted) => Ok(deleted),
            Err(BackendErrorKind::NotFound(_)) => Ok(true),
            Err(kind) => Err(failure(NAME, PURGE_STORAGE)(kind)),
        }
    }
}
