//! Storage type enumeration.

use serde::{Deserialize, Serialize};

/// The closed set of storage strategies a definition can name.
///
/// The string form is the exact, case-sensitive prefix used in encoded
/// storage definitions.
///
/// # Examples
///
/// ```
/// use filestore_core::StorageType;
///
/// let parsed: StorageType = "TEMPFOLDER".parse().unwrap();
/// assert_eq!(parsed, StorageType::TempFolder);
/// assert_eq!(format!("{}", StorageType::DocumentStore), "CAMUNDA");
/// assert!("folder".parse::<StorageType>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum StorageType {
    /// Bytes are carried inline in the reference
    #[display("JSON")]
    #[serde(rename = "JSON")]
    Json,
    /// Files under the system temporary directory
    #[display("TEMPFOLDER")]
    #[serde(rename = "TEMPFOLDER")]
    TempFolder,
    /// Files under a caller-chosen directory
    #[display("FOLDER")]
    #[serde(rename = "FOLDER")]
    Folder,
    /// Content-management repository
    #[display("CMIS")]
    #[serde(rename = "CMIS")]
    Cmis,
    /// Read-only URL
    #[display("URL")]
    #[serde(rename = "URL")]
    Url,
    /// Workflow engine document store
    #[display("CAMUNDA")]
    #[serde(rename = "CAMUNDA")]
    DocumentStore,
    /// Cloud drive
    #[display("GOOGLEDRIVE")]
    #[serde(rename = "GOOGLEDRIVE")]
    GoogleDrive,
}

impl StorageType {
    /// Convert to the prefix used in encoded definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Json => "JSON",
            StorageType::TempFolder => "TEMPFOLDER",
            StorageType::Folder => "FOLDER",
            StorageType::Cmis => "CMIS",
            StorageType::Url => "URL",
            StorageType::DocumentStore => "CAMUNDA",
            StorageType::GoogleDrive => "GOOGLEDRIVE",
        }
    }

    /// Whether the definition must carry a complement for this type.
    pub fn requires_complement(&self) -> bool {
        match self {
            StorageType::Folder | StorageType::Cmis => true,
            StorageType::Json
            | StorageType::TempFolder
            | StorageType::Url
            | StorageType::DocumentStore
            | StorageType::GoogleDrive => false,
        }
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSON" => Ok(StorageType::Json),
            "TEMPFOLDER" => Ok(StorageType::TempFolder),
            "FOLDER" => Ok(StorageType::Folder),
            "CMIS" => Ok(StorageType::Cmis),
            "URL" => Ok(StorageType::Url),
            "CAMUNDA" => Ok(StorageType::DocumentStore),
            "GOOGLEDRIVE" => Ok(StorageType::GoogleDrive),
            _ => Err(format!("Unknown storage type: {}", s)),
        }
    }
}
