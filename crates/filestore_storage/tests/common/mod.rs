//! In-memory collaborators shared by the storage tests.

#![allow(dead_code)]

use filestore_core::{CmisParameters, DocumentHandle, DocumentMetadata};
use filestore_storage::{
    BackendErrorKind, ClientResult, CmisConnector, CmisSession, DocumentStoreClient, DriveClient,
    DriveConnector, RemoteFile, RemoteMetadata, UrlFetcher,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CMIS_PASSWORD: &str = "repo-secret";
pub const DRIVE_CREDENTIAL: &str = "{\"type\":\"service_account\"}";

/// Route test logs through the test writer.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a subscriber scoped to this thread and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(buffer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

type Files = Arc<Mutex<HashMap<String, RemoteFile>>>;

fn store(files: &Files, id: String, name: &str, mime_type: Option<&str>, content: &[u8]) {
    files.lock().unwrap().insert(
        id,
        RemoteFile {
            name: Some(name.to_string()),
            mime_type: mime_type.map(str::to_string),
            content: content.to_vec(),
        },
    );
}

fn fetch(files: &Files, id: &str) -> ClientResult<RemoteFile> {
    files
        .lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| BackendErrorKind::NotFound(id.to_string()))
}

fn remove(files: &Files, id: &str) -> ClientResult<()> {
    files
        .lock()
        .unwrap()
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| BackendErrorKind::NotFound(id.to_string()))
}

/// Document store keeping documents in memory.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    files: Files,
    next_id: Arc<AtomicUsize>,
    deletes: bool,
}

impl MemoryDocumentStore {
    /// A store that honours deletes instead of keeping documents.
    pub fn deleting() -> Self {
        Self {
            deletes: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl DocumentStoreClient for MemoryDocumentStore {
    fn create(
        &self,
        content: &[u8],
        file_name: &str,
        content_type: Option<&str>,
    ) -> ClientResult<DocumentHandle> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        store(&self.files, id.clone(), file_name, content_type, content);
        Ok(DocumentHandle::new(
            "in-memory",
            id,
            None,
            DocumentMetadata::new(
                Some(file_name.to_string()),
                content_type.map(str::to_string),
                Some(content.len() as u64),
            ),
        ))
    }

    fn resolve(&self, handle: &DocumentHandle) -> ClientResult<RemoteFile> {
        fetch(&self.files, handle.document_id())
    }

    fn delete(&self, handle: &DocumentHandle) -> ClientResult<bool> {
        if !self.deletes {
            return Ok(false);
        }
        remove(&self.files, handle.document_id()).map(|_| true)
    }
}

/// Repository accepting only [`CMIS_PASSWORD`].
#[derive(Clone, Default)]
pub struct MemoryRepository {
    files: Files,
    next_id: Arc<AtomicUsize>,
    folders: Arc<Mutex<Vec<Option<String>>>>,
    connections: Arc<AtomicUsize>,
}

impl MemoryRepository {
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn folders(&self) -> Vec<Option<String>> {
        self.folders.lock().unwrap().clone()
    }

    pub fn contains(&self, object_id: &str) -> bool {
        self.files.lock().unwrap().contains_key(object_id)
    }
}

impl CmisConnector for MemoryRepository {
    fn connect(&self, parameters: &CmisParameters) -> ClientResult<Box<dyn CmisSession>> {
        if parameters.password() != CMIS_PASSWORD {
            return Err(BackendErrorKind::Authentication(format!(
                "user {} rejected",
                parameters.user_name()
            )));
        }
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }
}

impl CmisSession for MemoryRepository {
    fn create_document(
        &self,
        folder: Option<&str>,
        name: &str,
        mime_type: Option<&str>,
        content: &[u8],
    ) -> ClientResult<String> {
        let id = format!("workspace://SpacesStore/{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.folders.lock().unwrap().push(folder.map(str::to_string));
        store(&self.files, id.clone(), name, mime_type, content);
        Ok(id)
    }

    fn read_document(&self, object_id: &str) -> ClientResult<RemoteFile> {
        fetch(&self.files, object_id)
    }

    fn delete_document(&self, object_id: &str) -> ClientResult<()> {
        remove(&self.files, object_id)
    }
}

/// Drive accepting only [`DRIVE_CREDENTIAL`].
#[derive(Clone, Default)]
pub struct MemoryDrive {
    files: Files,
    next_id: Arc<AtomicUsize>,
    folders: Arc<Mutex<Vec<Option<String>>>>,
}

impl MemoryDrive {
    pub fn folders(&self) -> Vec<Option<String>> {
        self.folders.lock().unwrap().clone()
    }
}

impl DriveConnector for MemoryDrive {
    fn connect(&self, credential: &str) -> ClientResult<Box<dyn DriveClient>> {
        if credential != DRIVE_CREDENTIAL {
            return Err(BackendErrorKind::Authentication("invalid service account".to_string()));
        }
        Ok(Box::new(self.clone()))
    }
}

impl DriveClient for MemoryDrive {
    fn upload(
        &self,
        folder_id: Option<&str>,
        name: &str,
        mime_type: Option<&str>,
        content: &[u8],
    ) -> ClientResult<String> {
        let id = format!("1Drive{:04}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.folders.lock().unwrap().push(folder_id.map(str::to_string));
        store(&self.files, id.clone(), name, mime_type, content);
        Ok(id)
    }

    fn download(&self, file_id: &str) -> ClientResult<Vec<u8>> {
        fetch(&self.files, file_id).map(|file| file.content)
    }

    fn metadata(&self, file_id: &str) -> ClientResult<RemoteMetadata> {
        fetch(&self.files, file_id).map(|file| RemoteMetadata {
            name: file.name,
            mime_type: file.mime_type,
        })
    }

    fn delete(&self, file_id: &str) -> ClientResult<()> {
        remove(&self.files, file_id)
    }
}

/// Fetcher serving a fixed set of URLs.
#[derive(Clone, Default)]
pub struct StaticFetcher {
    pages: Arc<HashMap<String, Vec<u8>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn with_pages<B: AsRef<[u8]>>(pages: &[(&str, B)]) -> Self {
        Self {
            pages: Arc::new(
                pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.as_ref().to_vec()))
                    .collect(),
            ),
            requested: Arc::default(),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl UrlFetcher for StaticFetcher {
    fn get(&self, url: &reqwest::Url) -> ClientResult<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| BackendErrorKind::NotFound(url.to_string()))
    }
}
