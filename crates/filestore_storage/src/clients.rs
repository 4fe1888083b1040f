//! Contracts for the external systems remote backends talk to.
//!
//! Collaborators report failures as a [`BackendErrorKind`]; the backend
//! calling them attaches its name and the operation.

use filestore_core::{CmisParameters, DocumentHandle};
use filestore_error::{BackendError, BackendErrorKind, FilestoreResult};
use std::time::Duration;

/// Result returned by collaborator calls.
pub type ClientResult<T> = Result<T, BackendErrorKind>;

/// A file fetched from a remote system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFile {
    /// Name reported by the remote system
    pub name: Option<String>,
    /// Mime type reported by the remote system
    pub mime_type: Option<String>,
    /// File bytes
    pub content: Vec<u8>,
}

/// Metadata of a remote file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// Name reported by the remote system
    pub name: Option<String>,
    /// Mime type reported by the remote system
    pub mime_type: Option<String>,
}

/// Workflow engine document store.
pub trait DocumentStoreClient: Send + Sync {
    /// Store `content` and return the handle identifying it.
    fn create(
        &self,
        content: &[u8],
        file_name: &str,
        content_type: Option<&str>,
    ) -> ClientResult<DocumentHandle>;

    /// Fetch a document and the metadata stored with it.
    fn resolve(&self, handle: &DocumentHandle) -> ClientResult<RemoteFile>;

    /// Delete a document.
    ///
    /// Document stores own the lifecycle of their documents, so the default
    /// leaves the document in place and reports `false`.
    fn delete(&self, _handle: &DocumentHandle) -> ClientResult<bool> {
        Ok(false)
    }
}

/// Opens sessions against a content-management repository.
pub trait CmisConnector: Send + Sync {
    /// Connect with the parameters decoded from the storage definition.
    fn connect(&self, parameters: &CmisParameters) -> ClientResult<Box<dyn CmisSession>>;
}

/// An open repository session.
pub trait CmisSession {
    /// Create a document under `folder` (root when `None`) and return its object id.
    fn create_document(
        &self,
        folder: Option<&str>,
        name: &str,
        mime_type: Option<&str>,
        content: &[u8],
    ) -> ClientResult<String>;

    /// Read a document by object id.
    fn read_document(&self, object_id: &str) -> ClientResult<RemoteFile>;

    /// Delete a document by object id.
    fn delete_document(&self, object_id: &str) -> ClientResult<()>;
}

/// Opens authenticated clients against a cloud drive.
pub trait DriveConnector: Send + Sync {
    /// Authenticate with a service-account credential.
    fn connect(&self, credential: &str) -> ClientResult<Box<dyn DriveClient>>;
}

/// An authenticated cloud-drive client.
pub trait DriveClient {
    /// Upload a file under `folder_id` (drive root when `None`) and return its id.
    fn upload(
        &self,
        folder_id: Option<&str>,
        name: &str,
        mime_type: Option<&str>,
        content: &[u8],
    ) -> ClientResult<String>;

    /// Download the bytes of a file.
    fn download(&self, file_id: &str) -> ClientResult<Vec<u8>>;

    /// Fetch name and mime type of a file.
    fn metadata(&self, file_id: &str) -> ClientResult<RemoteMetadata>;

    /// Delete a file.
    fn delete(&self, file_id: &str) -> ClientResult<()>;
}

/// Read-only access to URLs.
pub trait UrlFetcher: Send + Sync {
    /// GET the resource at `url`.
    fn get(&self, url: &reqwest::Url) -> ClientResult<Vec<u8>>;
}

/// [`UrlFetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher. `timeout` bounds each request; `None` keeps the
    /// transport default.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> FilestoreResult<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            BackendError::new("Url", "connect", BackendErrorKind::Http(e.to_string()))
        })?;
        Ok(Self { client })
    }
}

impl UrlFetcher for HttpFetcher {
    #[tracing::instrument(skip(self), fields(url = %url))]
    fn get(&self, url: &reqwest::Url) -> ClientResult<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| BackendErrorKind::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendErrorKind::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(BackendErrorKind::Http(format!("{} returned {}", url, status)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| BackendErrorKind::Read(e.to_string()))?;
        tracing::debug!(size = bytes.len(), "Fetched URL");
        Ok(bytes.to_vec())
    }
}
