//! In-memory file artifacts.

use crate::{StorageDefinition, mime_type_from_name};

/// A binary artifact with its name, mime type and the definition it is bound to.
///
/// `Debug` reports the byte count, never the bytes.
///
/// # Examples
///
/// ```
/// use filestore_core::{FileVariable, StorageDefinition};
///
/// let variable = FileVariable::bound_to(StorageDefinition::temp_folder())
///     .with_name("report.pdf")
///     .with_value(b"%PDF-1.7".to_vec());
///
/// assert_eq!(variable.name(), "report.pdf");
/// assert_eq!(variable.effective_mime_type().as_deref(), Some("application/pdf"));
/// assert_eq!(variable.size(), 8);
/// ```
#[derive(Clone, Default, PartialEq, Eq, derive_getters::Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct FileVariable {
    /// Display name, usually the original file name
    #[setters(into)]
    name: String,
    /// Mime type; inferred from the name suffix when absent
    #[setters(strip_option, into)]
    mime_type: Option<String>,
    /// Artifact bytes
    value: Vec<u8>,
    /// Where the artifact came from or should go
    #[setters(strip_option)]
    storage_definition: Option<StorageDefinition>,
}

impl FileVariable {
    /// Create an empty variable bound to `definition`.
    pub fn bound_to(definition: StorageDefinition) -> Self {
        Self {
            storage_definition: Some(definition),
            ..Self::default()
        }
    }

    /// Size of the artifact in bytes.
    pub fn size(&self) -> usize {
        self.value.len()
    }

    /// The mime type, or the one inferred from the name when none is set.
    pub fn effective_mime_type(&self) -> Option<String> {
        self.mime_type
            .clone()
            .or_else(|| mime_type_from_name(&self.name))
    }

    /// Take the bytes out of the variable.
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}

impl std::fmt::Debug for FileVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileVariable")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.value.len())
            .field("storage_definition", &self.storage_definition)
            .finish()
    }
}
