//! Maps storage definitions to backend instances.

use crate::StorageContext;
use crate::backends::{
    CmisStorage, DocumentStoreStorage, DriveStorage, JsonStorage, LocalStorage, UrlStorage,
};
use crate::storage::Storage;
use filestore_core::{StorageDefinition, StorageType};
use filestore_error::{FilestoreResult, UnsupportedBackendError};

/// Builds a fresh backend for every call.
///
/// The match over [`StorageType`] has one arm per type and no fallback, so a
/// new type cannot be added without deciding how it is dispatched.
///
/// # Examples
///
/// ```
/// use filestore_core::{StorageDefinition, StorageType};
/// use filestore_storage::{Dispatcher, Storage, StorageContext};
///
/// let backend = Dispatcher::dispatch(&StorageDefinition::json(), &StorageContext::new()).unwrap();
/// assert_eq!(backend.storage_type(), StorageType::Json);
///
/// // The document store needs a client in the context.
/// assert!(Dispatcher::dispatch(&StorageDefinition::document_store(), &StorageContext::new()).is_err());
/// ```
pub struct Dispatcher;

impl Dispatcher {
    /// Create the backend serving `definition`.
    ///
    /// # Errors
    ///
    /// Returns an unsupported backend error when the context lacks the
    /// collaborator the backend needs, or a definition error when the
    /// definition's parameters do not fit the backend.
    #[tracing::instrument(skip_all, fields(storage_type = %definition.storage_type()))]
    pub fn dispatch(
        definition: &StorageDefinition,
        context: &StorageContext,
    ) -> FilestoreResult<Box<dyn Storage>> {
        let storage: Box<dyn Storage> = match definition.storage_type() {
            StorageType::Json => Box::new(JsonStorage::new(definition.clone())),
            StorageType::TempFolder => Box::new(LocalStorage::temp_folder(
                definition.clone(),
                context.temp_dir(),
            )),
            StorageType::Folder => Box::new(LocalStorage::folder(definition.clone())?),
            StorageType::Url => {
                let fetcher = context
                    .url_fetcher()
                    .ok_or_else(|| UnsupportedBackendError::new("Url", "UrlFetcher"))?;
                Box::new(UrlStorage::new(definition.clone(), fetcher)?)
            }
            StorageType::DocumentStore => {
                let client = context.document_store().ok_or_else(|| {
                    UnsupportedBackendError::new("DocumentStore", "DocumentStoreClient")
                })?;
                Box::new(DocumentStoreStorage::new(definition.clone(), client))
            }
            StorageType::Cmis => {
                let connector = context
                    .cmis()
                    .ok_or_else(|| UnsupportedBackendError::new("Cmis", "CmisConnector"))?;
                Box::new(CmisStorage::new(definition.clone(), connector)?)
            }
            StorageType::GoogleDrive => {
                let connector = context
                    .drive()
                    .ok_or_else(|| UnsupportedBackendError::new("GoogleDrive", "DriveConnector"))?;
                Box::new(DriveStorage::new(definition.clone(), connector)?)
            }
        };

        tracing::debug!(backend = storage.name(), "Dispatched storage backend");
        Ok(storage)
    }
}
