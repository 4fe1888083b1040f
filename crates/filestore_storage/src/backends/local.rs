//! Local directory storage shared by FOLDER and TEMPFOLDER.
//!
//! Each save writes a brand-new file whose name is derived from the
//! caller's name plus a process-wide unique id. Files are opened with
//! `create_new`, so an existing file is never overwritten.

use super::{FROM_STORAGE, PURGE_STORAGE, TO_STORAGE, content_key, loaded_variable};
use crate::storage::{Storage, sealed};
use filestore_core::{
    FileVariable, FileVariableReference, StorageDefinition, StorageType, unique_file_name,
};
use filestore_error::{
    BackendError, BackendErrorKind, DefinitionError, DefinitionErrorKind, FilestoreResult,
};
use std::io::Write;
use std::path::{Path, PathBuf};

// Retries when a generated name already exists on disk.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Filesystem storage rooted at one directory.
pub(crate) struct LocalStorage {
    name: &'static str,
    storage_type: StorageType,
    definition: StorageDefinition,
    root: PathBuf,
}

impl LocalStorage {
    /// Storage under `temp_dir`, or the system temporary directory.
    pub(crate) fn temp_folder(definition: StorageDefinition, temp_dir: Option<&Path>) -> Self {
        let root = temp_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        Self {
            name: "TempFolder",
            storage_type: StorageType::TempFolder,
            definition,
            root,
        }
    }

    /// Storage under the directory named by the definition's complement.
    pub(crate) fn folder(definition: StorageDefinition) -> FilestoreResult<Self> {
        let root = definition
            .complement()
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                DefinitionError::new(DefinitionErrorKind::MissingComplement(
                    StorageType::Folder.to_string(),
                ))
            })?;
        Ok(Self {
            name: "Folder",
            storage_type: StorageType::Folder,
            definition,
            root,
        })
    }

    fn ensure_root(&self) -> FilestoreResult<()> {
        if self.root.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.root).map_err(|e| {
            BackendError::new(
                self.name,
                TO_STORAGE,
                BackendErrorKind::DirectoryCreation(format!("{}: {}", self.root.display(), e)),
            )
        })?;
        tracing::info!(path = %self.root.display(), "Created storage directory");
        Ok(())
    }

    /// Resolve a content token to a path inside the root.
    ///
    /// Tokens are bare file names; anything that could climb out of the
    /// root is rejected.
    fn resolve(&self, operation: &'static str, token: &str) -> FilestoreResult<PathBuf> {
        let is_bare_name = !token.contains(['/', '\\'])
            && token != "."
            && token != ".."
            && Path::new(token).file_name().is_some();
        if !is_bare_name {
            return Err(BackendError::new(
                self.name,
                operation,
                BackendErrorKind::InvalidToken(format!("not a bare file name: {}", token)),
            )
            .into());
        }
        Ok(self.root.join(token))
    }

    fn write_new(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        if let Err(e) = file.write_all(content).and_then(|_| file.sync_all()) {
            drop(file);
            let _ = std::fs::remove_file(path);
            return Err(e);
        }
        Ok(())
    }
}

impl sealed::Sealed for LocalStorage {}

impl Storage for LocalStorage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    #[tracing::instrument(
        skip(self, variable),
        fields(backend = self.name, root = %self.root.display(), size = variable.size())
    )]
    fn to_storage(&self, variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        self.ensure_root()?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = unique_file_name(variable.name());
            let path = self.root.join(&file_name);
            match self.write_new(&path, variable.value()) {
                Ok(()) => {
                    tracing::debug!(file = %file_name, "Stored file");
                    return Ok(FileVariableReference::new(&self.definition, file_name));
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::warn!(file = %file_name, "Generated file name already taken, retrying");
                }
                Err(e) => {
                    return Err(BackendError::new(
                        self.name,
                        TO_STORAGE,
                        BackendErrorKind::Write(format!("{}: {}", path.display(), e)),
                    )
                    .into());
                }
            }
        }

        Err(BackendError::new(
            self.name,
            TO_STORAGE,
            BackendErrorKind::Write(format!(
                "no free file name for {} after {} attempts",
                variable.name(),
                MAX_NAME_ATTEMPTS
            )),
        )
        .into())
    }

    #[tracing::instrument(skip(self, reference), fields(backend = self.name))]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let token = content_key(self.name, FROM_STORAGE, reference)?;
        let path = self.resolve(FROM_STORAGE, token)?;

        let value = std::fs::read(&path).map_err(|e| {
            let kind = if e.kind() == std::io::ErrorKind::NotFound {
                BackendErrorKind::NotFound(path.display().to_string())
            } else {
                BackendErrorKind::Read(format!("{}: {}", path.display(), e))
            };
            BackendError::new(self.name, FROM_STORAGE, kind)
        })?;

        tracing::debug!(file = %token, size = value.len(), "Read file");
        Ok(loaded_variable(&self.definition, token.to_string(), None, value))
    }

    #[tracing::instrument(skip(self, reference), fields(backend = self.name))]
    fn purge_storage(&self, reference: &FileVariableReference) -> FilestoreResult<bool> {
        let token = content_key(self.name, PURGE_STORAGE, reference)?;
        let path = self.resolve(PURGE_STORAGE, token)?;

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(file = %token, "Deleted file");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(file = %token, "File already absent");
                Ok(true)
            }
            Err(e) => Err(BackendError::new(
                self.name,
                PURGE_STORAGE,
                BackendErrorKind::Delete(format!("{}: {}", path.display(), e)),
            )
            .into()),
        }
    }
}
