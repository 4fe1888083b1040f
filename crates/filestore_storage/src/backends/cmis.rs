//! Content-management repository backend.

use super::{FROM_STORAGE, PURGE_STORAGE, TO_STORAGE, content_key, failure, loaded_variable};
use crate::clients::{CmisConnector, CmisSession};
use crate::storage::{Storage, sealed};
use filestore_core::{
    CmisParameters, FileVariable, FileVariableReference, StorageDefinition, StorageType,
};
use filestore_error::{BackendErrorKind, FilestoreResult};
use std::sync::Arc;

const NAME: &str = "Cmis";

pub(crate) struct CmisStorage {
    definition: StorageDefinition,
    parameters: CmisParameters,
    connector: Arc<dyn CmisConnector>,
}

impl CmisStorage {
    pub(crate) fn new(
        definition: StorageDefinition,
        connector: Arc<dyn CmisConnector>,
    ) -> FilestoreResult<Self> {
        let parameters = definition.cmis_parameters()?;
        Ok(Self {
            definition,
            parameters,
            connector,
        })
    }

    fn session(&self, operation: &'static str) -> FilestoreResult<Box<dyn CmisSession>> {
        tracing::debug!(repository = %self.parameters.describe(), "Opening repository session");
        self.connector
            .connect(&self.parameters)
            .map_err(failure(NAME, operation))
    }
}

impl sealed::Sealed for CmisStorage {}

impl Storage for CmisStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Cmis
    }

    #[tracing::instrument(skip(self, variable), fields(size = variable.size()))]
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        let session = self.session(TO_STORAGE)?;
        let mime_type = variable.effective_mime_type();
        let object_id = session
            .create_document(
                self.parameters.folder().as_deref(),
                variable.name(),
                mime_type.as_deref(),
                variable.value(),
            )
            .map_err(failure(NAME, TO_STORAGE))?;
        tracing::debug!(object_id = %object_id, "Created repository document");
        Ok(FileVariableReference::new(&self.definition, object_id))
    }

    #[tracing::instrument(skip_all)]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let object_id = content_key(NAME, FROM_STORAGE, reference)?;
        let document = self
            .session(FROM_STORAGE)?
            .read_document(object_id)
            .map_err(failure(NAME, FROM_STORAGE))?;
        Ok(loaded_variable(
            &self.definition,
            document.name.unwrap_or_else(|| object_id.to_string()),
            document.mime_type,
            document.content,
        ))
    }

    #[tracing::instrument(skip_all)]
    fn purge_storage(&self, reference: &FileVariableReference) -> FilestoreResult<bool> {
        let object_id = content_key(NAME, PURGE_STORAGE, reference)?;
        match self.session(PURGE_STORAGE)?.delete_document(object_id) {
            Ok(()) => Ok(true),
            Err(BackendErrorKind::NotFound(_)) => Ok(true),
            Err(kind) => Err(failure(NAME, PURGE_STORAGE)(kind)),
        }
    }
}
