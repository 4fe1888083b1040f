//! Storage definition codec.
//!
//! A storage definition is the compact string `<TYPE>` or
//! `<TYPE>:<complement>` naming a backend and its parameters.

use crate::{CmisParameters, DriveParameters, StorageType};
use filestore_error::{DefinitionError, DefinitionErrorKind, FilestoreResult};

/// Separates the type prefix from the complement.
pub const DEFINITION_DELIMITER: char = ':';

/// Decoded storage definition.
///
/// Unstructured complements (FOLDER path, URL base) are kept verbatim in
/// `complement`; structured ones (CMIS, GOOGLEDRIVE) are parsed into
/// `complement_object`. The credential complement is supplied out-of-band,
/// is never encoded and never compared.
///
/// # Examples
///
/// ```
/// use filestore_core::{StorageDefinition, StorageType};
///
/// let definition = StorageDefinition::decode("FOLDER:/data/files").unwrap();
/// assert_eq!(*definition.storage_type(), StorageType::Folder);
/// assert_eq!(definition.complement().as_deref(), Some("/data/files"));
/// assert_eq!(definition.encode(), "FOLDER:/data/files");
/// ```
#[derive(Clone, derive_getters::Getters)]
pub struct StorageDefinition {
    /// Backend strategy
    storage_type: StorageType,
    /// Raw complement (folder path, URL base)
    complement: Option<String>,
    /// Parsed structured complement (repository or drive parameters)
    complement_object: Option<serde_json::Value>,
    /// Out-of-band secret, never encoded
    credential_complement: Option<String>,
}

impl StorageDefinition {
    fn bare(storage_type: StorageType) -> Self {
        Self {
            storage_type,
            complement: None,
            complement_object: None,
            credential_complement: None,
        }
    }

    /// Inline JSON storage. The default when a caller names none.
    pub fn json() -> Self {
        Self::bare(StorageType::Json)
    }

    /// Files under the system temporary directory.
    pub fn temp_folder() -> Self {
        Self::bare(StorageType::TempFolder)
    }

    /// Files under `path`.
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            complement: Some(path.into()),
            ..Self::bare(StorageType::Folder)
        }
    }

    /// Read-only URL storage where every content token is an absolute URL.
    pub fn url() -> Self {
        Self::bare(StorageType::Url)
    }

    /// Read-only URL storage resolving relative content tokens against `base`.
    pub fn url_with_base(base: impl Into<String>) -> Self {
        Self {
            complement: Some(base.into()),
            ..Self::bare(StorageType::Url)
        }
    }

    /// Workflow engine document store.
    pub fn document_store() -> Self {
        Self::bare(StorageType::DocumentStore)
    }

    /// Content-management repository reached with `parameters`.
    pub fn cmis(parameters: &CmisParameters) -> FilestoreResult<Self> {
        let object = to_object(StorageType::Cmis, parameters)?;
        Ok(Self {
            complement_object: Some(object),
            ..Self::bare(StorageType::Cmis)
        })
    }

    /// Cloud drive, optionally scoped to a folder.
    pub fn google_drive(parameters: &DriveParameters) -> FilestoreResult<Self> {
        let object = to_object(StorageType::GoogleDrive, parameters)?;
        let is_empty = object.as_object().is_some_and(|o| o.is_empty());
        Ok(Self {
            complement_object: (!is_empty).then_some(object),
            ..Self::bare(StorageType::GoogleDrive)
        })
    }

    /// Attach an out-of-band credential (e.g. a service-account key).
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential_complement = Some(credential.into());
        self
    }

    /// Decode a definition string.
    ///
    /// The input is split at the first delimiter. The prefix must match a
    /// type name exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the prefix is unknown, a required
    /// complement is absent, or a structured complement does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use filestore_core::{StorageDefinition, StorageType};
    ///
    /// let json = StorageDefinition::decode("JSON:ignored").unwrap();
    /// assert_eq!(*json.storage_type(), StorageType::Json);
    /// assert_eq!(json.encode(), "JSON");
    ///
    /// assert!(StorageDefinition::decode("json").is_err());
    /// assert!(StorageDefinition::decode("CMIS:not-an-object").is_err());
    /// ```
    pub fn decode(input: &str) -> FilestoreResult<Self> {
        let (prefix, complement) = match input.split_once(DEFINITION_DELIMITER) {
            Some((prefix, rest)) => (prefix, Some(rest)),
            None => (input, None),
        };

        let storage_type: StorageType = prefix.parse().map_err(|_| {
            DefinitionError::new(DefinitionErrorKind::UnknownType {
                storage_type: prefix.to_string(),
                definition: input.to_string(),
            })
        })?;

        let definition = match storage_type {
            StorageType::Json | StorageType::TempFolder | StorageType::DocumentStore => {
                Self::bare(storage_type)
            }
            StorageType::Folder => match complement {
                Some(path) if !path.is_empty() => Self::folder(path),
                Some(_) | None => {
                    return Err(DefinitionError::new(DefinitionErrorKind::MissingComplement(
                        storage_type.to_string(),
                    ))
                    .into());
                }
            },
            StorageType::Url => match complement {
                Some(base) => Self::url_with_base(base),
                None => Self::url(),
            },
            StorageType::Cmis => {
                let raw = complement.filter(|c| !c.is_empty()).ok_or_else(|| {
                    DefinitionError::new(DefinitionErrorKind::MissingComplement(
                        storage_type.to_string(),
                    ))
                })?;
                let parameters: CmisParameters = parse_complement(storage_type, raw)?;
                Self::cmis(&parameters)?
            }
            StorageType::GoogleDrive => match complement.filter(|c| !c.is_empty()) {
                Some(raw) => {
                    let parameters: DriveParameters = parse_complement(storage_type, raw)?;
                    Self::google_drive(&parameters)?
                }
                None => Self::bare(storage_type),
            },
        };

        tracing::trace!(storage_type = %storage_type, "Decoded storage definition");
        Ok(definition)
    }

    /// Encode to the compact string form.
    ///
    /// The credential complement is never part of the output.
    pub fn encode(&self) -> String {
        let mut encoded = self.storage_type.as_str().to_string();
        if let Some(complement) = &self.complement {
            encoded.push(DEFINITION_DELIMITER);
            encoded.push_str(complement);
        } else if let Some(object) = &self.complement_object {
            encoded.push(DEFINITION_DELIMITER);
            encoded.push_str(&object.to_string());
        }
        encoded
    }

    /// Redacted summary for log lines. Never persist this.
    ///
    /// # Examples
    ///
    /// ```
    /// use filestore_core::{CmisParameters, StorageDefinition};
    ///
    /// let params = CmisParameters::builder()
    ///     .url("http://cmis.local/atom")
    ///     .repository_name("archive")
    ///     .user_name("svc")
    ///     .password("hunter2")
    ///     .build()
    ///     .unwrap();
    /// let summary = StorageDefinition::cmis(&params).unwrap().describe();
    ///
    /// assert!(summary.contains("archive"));
    /// assert!(!summary.contains("hunter2"));
    /// ```
    pub fn describe(&self) -> String {
        match self.storage_type {
            StorageType::Json | StorageType::TempFolder | StorageType::DocumentStore => {
                self.storage_type.to_string()
            }
            StorageType::Folder => format!(
                "FOLDER path=[{}]",
                self.complement.as_deref().unwrap_or_default()
            ),
            StorageType::Url => match &self.complement {
                Some(base) => format!("URL base=[{}]", base),
                None => "URL".to_string(),
            },
            StorageType::Cmis => match self.cmis_parameters() {
                Ok(parameters) => format!("CMIS {}", parameters.describe()),
                Err(_) => "CMIS <invalid parameters>".to_string(),
            },
            StorageType::GoogleDrive => {
                let folder = self
                    .drive_parameters()
                    .ok()
                    .and_then(|p| p.folder_id().clone())
                    .unwrap_or_else(|| "root".to_string());
                let credential = if self.credential_complement.is_some() {
                    "provided"
                } else {
                    "absent"
                };
                format!("GOOGLEDRIVE folderId=[{}] credential=[{}]", folder, credential)
            }
        }
    }

    /// Repository connection parameters of a CMIS definition.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the definition carries no
    /// parseable CMIS complement.
    pub fn cmis_parameters(&self) -> FilestoreResult<CmisParameters> {
        let object = self.complement_object.clone().ok_or_else(|| {
            DefinitionError::new(DefinitionErrorKind::MissingComplement(
                StorageType::Cmis.to_string(),
            ))
        })?;
        from_object(StorageType::Cmis, object)
    }

    /// Drive parameters of a GOOGLEDRIVE definition; empty when none were given.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the complement does not describe
    /// drive parameters.
    pub fn drive_parameters(&self) -> FilestoreResult<DriveParameters> {
        match &self.complement_object {
            Some(object) => from_object(StorageType::GoogleDrive, object.clone()),
            None => Ok(DriveParameters::default()),
        }
    }
}

fn parse_complement<T: serde::de::DeserializeOwned>(
    storage_type: StorageType,
    raw: &str,
) -> FilestoreResult<T> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        DefinitionError::new(DefinitionErrorKind::InvalidComplement {
            storage_type: storage_type.to_string(),
            reason: e.to_string(),
        })
    })?;
    if !value.is_object() {
        return Err(DefinitionError::new(DefinitionErrorKind::InvalidComplement {
            storage_type: storage_type.to_string(),
            reason: "complement is not an object".to_string(),
        })
        .into());
    }
    from_object(storage_type, value)
}

fn from_object<T: serde::de::DeserializeOwned>(
    storage_type: StorageType,
    object: serde_json::Value,
) -> FilestoreResult<T> {
    serde_json::from_value(object).map_err(|e| {
        DefinitionError::new(DefinitionErrorKind::InvalidComplement {
            storage_type: storage_type.to_string(),
            reason: e.to_string(),
        })
        .into()
    })
}

fn to_object<T: serde::Serialize>(
    storage_type: StorageType,
    parameters: &T,
) -> FilestoreResult<serde_json::Value> {
    serde_json::to_value(parameters).map_err(|e| {
        DefinitionError::new(DefinitionErrorKind::InvalidComplement {
            storage_type: storage_type.to_string(),
            reason: e.to_string(),
        })
        .into()
    })
}

impl Default for StorageDefinition {
    fn default() -> Self {
        Self::json()
    }
}

// The credential complement is out-of-band and does not take part in equality.
impl PartialEq for StorageDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.storage_type == other.storage_type
            && self.complement == other.complement
            && self.complement_object == other.complement_object
    }
}

impl Eq for StorageDefinition {}

impl std::fmt::Debug for StorageDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageDefinition")
            .field("storage_type", &self.storage_type)
            .field("summary", &self.describe())
            .finish()
    }
}

impl std::str::FromStr for StorageDefinition {
    type Err = filestore_error::FilestoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
