//! Serializable references to stored file variables.

use crate::{StorageDefinition, StorageType};
use filestore_error::{FilestoreResult, ReferenceError, ReferenceErrorKind};
use serde::{Deserialize, Serialize};

/// Longest content-token preview a log line may carry.
pub const PREVIEW_LIMIT: usize = 100;

/// Metadata a document store keeps next to a document.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Mime type reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    /// File name reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl DocumentMetadata {
    /// Metadata for a document named `file_name`.
    pub fn new(file_name: Option<String>, content_type: Option<String>, size: Option<u64>) -> Self {
        Self {
            content_type,
            file_name,
            size,
        }
    }
}

/// Typed handle a document store returns instead of a plain token.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHandle {
    /// Store the document lives in
    store_id: String,
    /// Document id within the store
    document_id: String,
    /// Content hash, when the store computes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_hash: Option<String>,
    /// Stored metadata
    #[serde(default)]
    metadata: DocumentMetadata,
}

impl DocumentHandle {
    /// Create a handle.
    pub fn new(
        store_id: impl Into<String>,
        document_id: impl Into<String>,
        content_hash: Option<String>,
        metadata: DocumentMetadata,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            document_id: document_id.into(),
            content_hash,
            metadata,
        }
    }
}

/// Backend-specific pointer to a stored artifact.
///
/// Serialized as a plain string for key-based backends and as an object for
/// document-store handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum ContentToken {
    /// File name, object id, URL, drive file id or inline payload
    Key(String),
    /// Document-store handle
    Handle(DocumentHandle),
}

impl From<&str> for ContentToken {
    fn from(key: &str) -> Self {
        ContentToken::Key(key.to_string())
    }
}

impl ContentToken {
    /// The plain token, if this is one.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            ContentToken::Key(key) => Some(key),
            ContentToken::Handle(_) => None,
        }
    }

    /// The document handle, if this is one.
    pub fn as_handle(&self) -> Option<&DocumentHandle> {
        match self {
            ContentToken::Key(_) => None,
            ContentToken::Handle(handle) => Some(handle),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ContentToken::Key(key) => key.is_empty(),
            ContentToken::Handle(handle) => handle.document_id.is_empty(),
        }
    }
}

/// Serializable pointer to a stored file variable.
///
/// The encoded storage definition plus the content token locate the
/// artifact without any other context. The wire form is
/// `{"storageDefinition": .., "content": .., "originalFileName": ..}`.
///
/// # Examples
///
/// ```
/// use filestore_core::{FileVariableReference, StorageDefinition};
///
/// let reference = FileVariableReference::new(
///     &StorageDefinition::folder("/data/files"),
///     "report_1700000000000_0_1a2b3c4d.pdf",
/// )
/// .with_original_file_name("report.pdf");
///
/// let json = reference.to_json().unwrap();
/// let escaped = json.replace('"', "\\\"");
///
/// assert_eq!(FileVariableReference::from_json(&json).unwrap(), reference);
/// assert_eq!(FileVariableReference::from_json(&escaped).unwrap(), reference);
/// ```
#[derive(Clone, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct FileVariableReference {
    /// Encoded storage definition
    storage_definition: String,
    /// Backend-specific content token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<ContentToken>,
    /// Name the artifact was saved under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_file_name: Option<String>,
    #[serde(skip)]
    #[getter(skip)]
    decoded: Option<StorageDefinition>,
}

impl FileVariableReference {
    /// Reference to `content` in the backend described by `definition`.
    pub fn new(definition: &StorageDefinition, content: impl Into<ContentToken>) -> Self {
        Self {
            storage_definition: definition.encode(),
            content: Some(content.into()),
            original_file_name: None,
            decoded: Some(definition.clone()),
        }
    }

    /// Replace the storage definition with the canonical encoding of `definition`.
    pub fn with_storage_definition(mut self, definition: &StorageDefinition) -> Self {
        self.storage_definition = definition.encode();
        self.decoded = Some(definition.clone());
        self
    }

    /// Record the name the artifact was saved under.
    pub fn with_original_file_name(mut self, name: impl Into<String>) -> Self {
        self.original_file_name = Some(name.into());
        self
    }

    /// Attach the out-of-band credential a backend needs to reach the artifact.
    ///
    /// # Errors
    ///
    /// Returns a definition error when the stored definition does not decode.
    pub fn with_credential(mut self, credential: impl Into<String>) -> FilestoreResult<Self> {
        let definition = self.definition()?.with_credential(credential);
        self.decoded = Some(definition);
        Ok(self)
    }

    /// Whether a non-empty content token or handle is present.
    pub fn has_content(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// The decoded storage definition.
    ///
    /// # Errors
    ///
    /// Returns a definition error when the stored definition does not decode.
    pub fn definition(&self) -> FilestoreResult<StorageDefinition> {
        match &self.decoded {
            Some(definition) => Ok(definition.clone()),
            None => StorageDefinition::decode(&self.storage_definition),
        }
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> FilestoreResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ReferenceError::new(ReferenceErrorKind::Encode(e.to_string())).into()
        })
    }

    /// Parse the JSON wire form.
    ///
    /// When the input does not parse, it is retried once with every `\"`
    /// replaced by `"`. The storage definition is decoded eagerly.
    ///
    /// # Errors
    ///
    /// Returns a reference error when neither form parses, or a definition
    /// error when the embedded definition is malformed.
    #[tracing::instrument(skip(input), fields(len = input.len()))]
    pub fn from_json(input: &str) -> FilestoreResult<Self> {
        let parsed = match serde_json::from_str::<Self>(input) {
            Ok(reference) => reference,
            Err(first) => {
                tracing::debug!(error = %first, "Reference did not parse, retrying with unescaped quotes");
                let unescaped = input.replace("\\\"", "\"");
                serde_json::from_str::<Self>(&unescaped).map_err(|e| {
                    ReferenceError::new(ReferenceErrorKind::Decode(format!(
                        "{}; after unescaping: {}",
                        first, e
                    )))
                })?
            }
        };
        parsed.eagerly_decoded()
    }

    /// Normalize a loosely-typed input into a reference.
    ///
    /// Accepts a JSON string holding the wire form, a JSON object, or a
    /// one-element array wrapping either.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceErrorKind::UnsupportedInput`] for any other shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use filestore_core::FileVariableReference;
    /// use serde_json::json;
    ///
    /// let object = json!({"storageDefinition": "TEMPFOLDER", "content": "a_1.txt"});
    /// let wrapped = json!([object.to_string()]);
    ///
    /// let a = FileVariableReference::from_value(object).unwrap();
    /// let b = FileVariableReference::from_value(wrapped).unwrap();
    /// assert_eq!(a, b);
    /// assert!(FileVariableReference::from_value(json!(42)).is_err());
    /// ```
    pub fn from_value(input: serde_json::Value) -> FilestoreResult<Self> {
        match input {
            serde_json::Value::Array(mut items) if items.len() == 1 => match items.remove(0) {
                item @ (serde_json::Value::String(_) | serde_json::Value::Object(_)) => {
                    Self::from_value(item)
                }
                other => Err(unsupported_input(&other)),
            },
            serde_json::Value::String(text) => Self::from_json(&text),
            object @ serde_json::Value::Object(_) => {
                let parsed: Self = serde_json::from_value(object).map_err(|e| {
                    ReferenceError::new(ReferenceErrorKind::Decode(e.to_string()))
                })?;
                parsed.eagerly_decoded()
            }
            other => Err(unsupported_input(&other)),
        }
    }

    /// Redacted one-line summary for logs: the definition summary and a
    /// content-token preview of at most [`PREVIEW_LIMIT`] characters.
    pub fn describe(&self) -> String {
        let (summary, inline) = match self.definition() {
            Ok(definition) => (
                definition.describe(),
                *definition.storage_type() == StorageType::Json,
            ),
            Err(_) => (format!("<undecodable {}>", preview(&self.storage_definition)), false),
        };
        let content = match &self.content {
            None => "<none>".to_string(),
            Some(ContentToken::Key(key)) if inline => format!("<inline, {} chars>", key.len()),
            Some(ContentToken::Key(key)) => preview(key),
            Some(ContentToken::Handle(handle)) => {
                format!("document {}/{}", handle.store_id, preview(&handle.document_id))
            }
        };
        format!("{} content=[{}]", summary, content)
    }

    fn eagerly_decoded(mut self) -> FilestoreResult<Self> {
        self.decoded = Some(StorageDefinition::decode(&self.storage_definition)?);
        Ok(self)
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LIMIT {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_LIMIT).collect();
        format!("{}...", truncated)
    }
}

fn unsupported_input(value: &serde_json::Value) -> filestore_error::FilestoreError {
    let shape = match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    };
    ReferenceError::new(ReferenceErrorKind::UnsupportedInput(shape.to_string())).into()
}

// The decoded definition is a cache of `storage_definition`.
impl PartialEq for FileVariableReference {
    fn eq(&self, other: &Self) -> bool {
        self.storage_definition == other.storage_definition
            && self.content == other.content
            && self.original_file_name == other.original_file_name
    }
}

impl Eq for FileVariableReference {}

impl std::fmt::Debug for FileVariableReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileVariableReference")
            .field("summary", &self.describe())
            .field("original_file_name", &self.original_file_name)
            .finish()
    }
}
