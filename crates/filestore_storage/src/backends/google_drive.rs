//! Cloud-drive backend.

use super::{FROM_STORAGE, PURGE_STORAGE, TO_STORAGE, content_key, failure, loaded_variable};
use crate::clients::{DriveClient, DriveConnector};
use crate::storage::{Storage, sealed};
use filestore_core::{
    DriveParameters, FileVariable, FileVariableReference, StorageDefinition, StorageType,
};
use filestore_error::{BackendError, BackendErrorKind, FilestoreResult};
use std::sync::Arc;

const NAME: &str = "GoogleDrive";

pub(crate) struct DriveStorage {
    definition: StorageDefinition,
    parameters: DriveParameters,
    connector: Arc<dyn DriveConnector>,
}

impl DriveStorage {
    pub(crate) fn new(
        definition: StorageDefinition,
        connector: Arc<dyn DriveConnector>,
    ) -> FilestoreResult<Self> {
        let parameters = definition.drive_parameters()?;
        Ok(Self {
            definition,
            parameters,
            connector,
        })
    }

    fn client(&self, operation: &'static str) -> FilestoreResult<Box<dyn DriveClient>> {
        let credential = self.definition.credential_complement().as_deref().ok_or_else(|| {
            BackendError::new(
                NAME,
                operation,
                BackendErrorKind::Authentication(
                    "incomplete configuration: no service-account credential supplied".to_string(),
                ),
            )
        })?;
        self.connector
            .connect(credential)
            .map_err(failure(NAME, operation))
    }
}

impl sealed::Sealed for DriveStorage {}

impl Storage for DriveStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn storage_type(&self) -> StorageType {
        StorageType::GoogleDrive
    }

    #[tracing::instrument(skip(self, variable), fields(size = variable.size()))]
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        let client = self.client(TO_STORAGE)?;
        let mime_type = variable.effective_mime_type();
        let file_id = client
            .upload(
                self.parameters.folder_id().as_deref(),
                variable.name(),
                mime_type.as_deref(),
                variable.value(),
            )
            .map_err(failure(NAME, TO_STORAGE))?;
        tracing::debug!(file_id = %file_id, "Uploaded file");
        Ok(FileVariableReference::new(&self.definition, file_id))
    }

    #[tracing::instrument(skip_all)]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let file_id = content_key(NAME, FROM_STORAGE, reference)?;
        let client = self.client(FROM_STORAGE)?;
        let metadata = client
            .metadata(file_id)
            .map_err(failure(NAME, FROM_STORAGE))?;
        let value = client
            .download(file_id)
            .map_err(failure(NAME, FROM_STORAGE))?;
        Ok(loaded_variable(
            &self.definition,
            metadata.name.unwrap_or_else(|| file_id.to_string()),
            metadata.mime_type,
            value,
        ))
    }

    #[tracing::instrument(skip_all)]
    fn purge_storage(&self, reference: &FileVariableReference) -> FilestoreResult<bool> {
        let file_id = content_key(NAME, PURGE_STORAGE, reference)?;
        match self.client(PURGE_STORAGE)?.delete(file_id) {
            Ok(()) => Ok(true),
            Err(BackendErrorKind::NotFound(_)) => Ok(true),
            Err(kind) => Err(failure(NAME, PURGE_STORAGE)(kind)),
        }
    }
}
