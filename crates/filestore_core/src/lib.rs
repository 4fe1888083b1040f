//! Core data types for the filestore library.
//!
//! This crate provides the storage-definition codec, the in-memory
//! [`FileVariable`] and its serializable [`FileVariableReference`], plus the
//! naming and mime helpers filesystem-backed storage relies on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cmis;
mod definition;
mod drive;
mod mime;
mod reference;
mod storage_type;
mod unique_id;
mod variable;

pub use cmis::{CmisParameters, CmisParametersBuilder};
pub use definition::{DEFINITION_DELIMITER, StorageDefinition};
pub use drive::DriveParameters;
pub use mime::{mime_type_from_name, split_suffix};
pub use reference::{
    ContentToken, DocumentHandle, DocumentMetadata, FileVariableReference, PREVIEW_LIMIT,
};
pub use storage_type::StorageType;
pub use unique_id::{MAX_BASE_LEN, unique_file_name, unique_id};
pub use variable::FileVariable;
