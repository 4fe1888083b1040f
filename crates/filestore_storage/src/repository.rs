//! The create/save/load/purge façade callers use.

use crate::{Dispatcher, StorageContext};
use filestore_core::{FileVariable, FileVariableReference, StorageDefinition, mime_type_from_name};
use filestore_error::FilestoreResult;

/// Entry point for persisting file variables.
///
/// Holds no state: every call dispatches a fresh backend from the
/// definition and the collaborators in the given [`StorageContext`].
///
/// # Examples
///
/// ```
/// use filestore_storage::{FileRepository, StorageContext};
///
/// let repository = FileRepository::new();
/// let context = StorageContext::new();
///
/// let variable = repository
///     .create_file_variable(None)
///     .with_name("hello.txt")
///     .with_value(b"hello".to_vec());
/// let reference = repository
///     .save_file_variable(Some(&variable), &context)
///     .unwrap()
///     .unwrap();
///
/// let loaded = repository
///     .load_file_variable(Some(&reference), &context)
///     .unwrap()
///     .unwrap();
/// assert_eq!(loaded.value(), b"hello");
/// assert_eq!(loaded.mime_type().as_deref(), Some("text/plain"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRepository;

impl FileRepository {
    /// Create a repository.
    pub fn new() -> Self {
        Self
    }

    /// An empty variable bound to `definition`, or to inline JSON storage.
    pub fn create_file_variable(&self, definition: Option<StorageDefinition>) -> FileVariable {
        FileVariable::bound_to(definition.unwrap_or_default())
    }

    /// Persist `variable` with the backend of its bound definition.
    ///
    /// A missing variable is logged and yields `Ok(None)`. The returned
    /// reference always carries the canonical encoding of the variable's
    /// definition and the variable's name, whatever the backend reported.
    ///
    /// A variable bound to no definition is stored inline as JSON.
    ///
    /// # Errors
    ///
    /// Every dispatch and backend failure is propagated.
    #[tracing::instrument(skip_all)]
    pub fn save_file_variable(
        &self,
        variable: Option<&FileVariable>,
        context: &StorageContext,
    ) -> FilestoreResult<Option<FileVariableReference>> {
        let Some(variable) = variable else {
            tracing::error!(operation = "save", "No file variable given to save");
            return Ok(None);
        };
        let subject = format!("{} ({} bytes)", variable.name(), variable.size());

        let result = (|| -> FilestoreResult<FileVariableReference> {
            let definition = match variable.storage_definition() {
                Some(definition) => definition.clone(),
                None => {
                    tracing::warn!(
                        operation = "save",
                        name = %variable.name(),
                        "File variable has no storage definition, storing inline"
                    );
                    StorageDefinition::default()
                }
            };
            let storage = Dispatcher::dispatch(&definition, context)?;
            let reference = storage.to_storage(variable)?;
            tracing::info!(
                backend = storage.name(),
                name = %variable.name(),
                size = variable.size(),
                "Saved file variable"
            );
            Ok(reference
                .with_storage_definition(&definition)
                .with_original_file_name(variable.name().clone()))
        })();

        logged(result, "save", &subject).map(Some)
    }

    /// Resolve `reference` back into a file variable.
    ///
    /// A missing reference, or one with neither a content token nor a
    /// handle, is logged and yields `Ok(None)`. The reference's original
    /// file name, when present, replaces the name the backend reports.
    ///
    /// # Errors
    ///
    /// Every definition and backend failure is propagated.
    #[tracing::instrument(skip_all)]
    pub fn load_file_variable(
        &self,
        reference: Option<&FileVariableReference>,
        context: &StorageContext,
    ) -> FilestoreResult<Option<FileVariable>> {
        let Some(reference) = reference else {
            tracing::error!(operation = "load", "No reference given to load");
            return Ok(None);
        };
        if !reference.has_content() {
            tracing::error!(
                operation = "load",
                reference = %reference.describe(),
                "Reference carries no content"
            );
            return Ok(None);
        }

        let result = (|| -> FilestoreResult<FileVariable> {
            let definition = reference.definition()?;
            let storage = Dispatcher::dispatch(&definition, context)?;
            let mut variable = storage.from_storage(reference)?;

            if let Some(name) = reference.original_file_name() {
                let needs_mime_type = variable.mime_type().is_none();
                variable = variable.with_name(name.clone());
                if let Some(mime_type) = mime_type_from_name(name).filter(|_| needs_mime_type) {
                    variable = variable.with_mime_type(mime_type);
                }
            }
            tracing::info!(
                backend = storage.name(),
                name = %variable.name(),
                size = variable.size(),
                "Loaded file variable"
            );
            Ok(variable)
        })();

        logged(result, "load", &reference.describe()).map(Some)
    }

    /// Delete the artifact `reference` points to.
    ///
    /// A missing reference is logged as a warning and counts as success.
    ///
    /// # Errors
    ///
    /// Every definition and backend failure is propagated.
    #[tracing::instrument(skip_all)]
    pub fn purge_file_variable(
        &self,
        reference: Option<&FileVariableReference>,
        context: &StorageContext,
    ) -> FilestoreResult<bool> {
        let Some(reference) = reference else {
            tracing::warn!(operation = "purge", "No reference given to purge");
            return Ok(true);
        };

        let result = (|| -> FilestoreResult<bool> {
            let definition = reference.definition()?;
            let storage = Dispatcher::dispatch(&definition, context)?;
            let purged = storage.purge_storage(reference)?;
            tracing::info!(backend = storage.name(), purged, "Purged file variable");
            Ok(purged)
        })();

        logged(result, "purge", &reference.describe())
    }
}

fn logged<T>(result: FilestoreResult<T>, operation: &str, subject: &str) -> FilestoreResult<T> {
    if let Err(e) = &result {
        tracing::error!(
            operation,
            subject,
            backend = e.backend().unwrap_or("-"),
            error = %e,
            "File variable operation failed"
        );
    }
    result
}
