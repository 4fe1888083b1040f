//! Invocation context carrying external collaborators.

use crate::clients::{CmisConnector, DocumentStoreClient, DriveConnector, UrlFetcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Collaborators and settings handed to every façade call.
///
/// The context is passed explicitly and never stored by a backend beyond
/// the single operation it was dispatched for.
///
/// # Examples
///
/// ```
/// use filestore_storage::StorageContext;
///
/// let context = StorageContext::new().with_temp_dir("/var/tmp/filestore");
/// assert!(context.document_store().is_none());
/// assert_eq!(context.temp_dir().unwrap().to_str(), Some("/var/tmp/filestore"));
/// ```
#[derive(Clone, Default)]
pub struct StorageContext {
    document_store: Option<Arc<dyn DocumentStoreClient>>,
    cmis: Option<Arc<dyn CmisConnector>>,
    drive: Option<Arc<dyn DriveConnector>>,
    url_fetcher: Option<Arc<dyn UrlFetcher>>,
    temp_dir: Option<PathBuf>,
}

impl StorageContext {
    /// Empty context: only JSON, TEMPFOLDER and FOLDER can be dispatched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply a document-store client.
    pub fn with_document_store(mut self, client: impl DocumentStoreClient + 'static) -> Self {
        self.document_store = Some(Arc::new(client));
        self
    }

    /// Supply a repository connector.
    pub fn with_cmis(mut self, connector: impl CmisConnector + 'static) -> Self {
        self.cmis = Some(Arc::new(connector));
        self
    }

    /// Supply a cloud-drive connector.
    pub fn with_drive(mut self, connector: impl DriveConnector + 'static) -> Self {
        self.drive = Some(Arc::new(connector));
        self
    }

    /// Supply a URL fetcher.
    pub fn with_url_fetcher(mut self, fetcher: impl UrlFetcher + 'static) -> Self {
        self.url_fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Override the root of TEMPFOLDER storage.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// The document-store client, if supplied.
    pub fn document_store(&self) -> Option<Arc<dyn DocumentStoreClient>> {
        self.document_store.clone()
    }

    /// The repository connector, if supplied.
    pub fn cmis(&self) -> Option<Arc<dyn CmisConnector>> {
        self.cmis.clone()
    }

    /// The cloud-drive connector, if supplied.
    pub fn drive(&self) -> Option<Arc<dyn DriveConnector>> {
        self.drive.clone()
    }

    /// The URL fetcher, if supplied.
    pub fn url_fetcher(&self) -> Option<Arc<dyn UrlFetcher>> {
        self.url_fetcher.clone()
    }

    /// The TEMPFOLDER root override, if any.
    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }
}

impl std::fmt::Debug for StorageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageContext")
            .field("document_store", &self.document_store.is_some())
            .field("cmis", &self.cmis.is_some())
            .field("drive", &self.drive.is_some())
            .field("url_fetcher", &self.url_fetcher.is_some())
            .field("temp_dir", &self.temp_dir)
            .finish()
    }
}
