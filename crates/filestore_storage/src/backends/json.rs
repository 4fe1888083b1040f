//! Inline storage: the bytes travel inside the reference.

use super::{FROM_STORAGE, TO_STORAGE, content_key, loaded_variable};
use crate::storage::{Storage, sealed};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use filestore_core::{FileVariable, FileVariableReference, StorageDefinition, StorageType};
use filestore_error::{BackendError, BackendErrorKind, FilestoreResult};
use serde::{Deserialize, Serialize};

const NAME: &str = "Json";

/// Content token layout of inline storage.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlinePayload {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    value: String,
}

pub(crate) struct JsonStorage {
    definition: StorageDefinition,
}

impl JsonStorage {
    pub(crate) fn new(definition: StorageDefinition) -> Self {
        Self { definition }
    }
}

impl sealed::Sealed for JsonStorage {}

impl Storage for JsonStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Json
    }

    #[tracing::instrument(skip(self, variable), fields(size = variable.size()))]
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        let payload = InlinePayload {
            name: variable.name().clone(),
            mime_type: variable.mime_type().clone(),
            value: STANDARD.encode(variable.value()),
        };
        let token = serde_json::to_string(&payload).map_err(|e| {
            BackendError::new(NAME, TO_STORAGE, BackendErrorKind::Write(e.to_string()))
        })?;
        Ok(FileVariableReference::new(&self.definition, token))
    }

    #[tracing::instrument(skip_all)]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let token = content_key(NAME, FROM_STORAGE, reference)?;
        let payload: InlinePayload = serde_json::from_str(token).map_err(|e| {
            BackendError::new(NAME, FROM_STORAGE, BackendErrorKind::InvalidToken(e.to_string()))
        })?;
        let value = STANDARD.decode(payload.value.as_bytes()).map_err(|e| {
            BackendError::new(NAME, FROM_STORAGE, BackendErrorKind::InvalidToken(e.to_string()))
        })?;
        Ok(loaded_variable(
            &self.definition,
            payload.name,
            payload.mime_type,
            value,
        ))
    }

    // Nothing lives outside the reference.
    fn purge_storage(&self, _reference: &FileVariableReference) -> FilestoreResult<bool> {
        Ok(true)
    }
}
