//! Filestore - pluggable storage for workflow file variables
//!
//! A file variable is a named binary payload with an optional MIME type,
//! bound to a storage definition such as `JSON`, `TEMPFOLDER`,
//! `FOLDER:/var/lib/files` or `CMIS:{...}`. Saving it produces a compact
//! [`FileVariableReference`] that is safe to keep in workflow state;
//! loading the reference resolves the bytes again through whichever backend
//! the definition names.
//!
//! # Quick Start
//!
//! ```rust
//! use filestore::{FileRepository, StorageContext, StorageDefinition};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = FileRepository::new();
//! let context = StorageContext::new();
//!
//! let variable = repository
//!     .create_file_variable(Some(StorageDefinition::temp_folder()))
//!     .with_name("report.pdf")
//!     .with_value(b"%PDF-1.7".to_vec());
//!
//! if let Some(reference) = repository.save_file_variable(Some(&variable), &context)? {
//!     let wire = reference.to_json()?;
//!     let restored = filestore::FileVariableReference::from_json(&wire)?;
//!     let loaded = repository.load_file_variable(Some(&restored), &context)?;
//!     assert_eq!(loaded.map(|v| v.into_value()), Some(b"%PDF-1.7".to_vec()));
//!     repository.purge_file_variable(Some(&restored), &context)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `filestore_error` - Error types
//! - `filestore_core` - Storage definitions, file variables and references
//! - `filestore_storage` - Backends, dispatcher and repository façade
//!
//! This crate re-exports all of them and adds layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::FilestoreConfig;

pub use filestore_core::*;
pub use filestore_error::*;
pub use filestore_storage::*;
