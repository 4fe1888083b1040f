//! Pluggable file-variable storage for filestore.
//!
//! This crate provides the [`Storage`] contract, the backends implementing
//! it, the [`Dispatcher`] choosing a backend from a storage definition, and
//! the [`FileRepository`] façade tying them together.
//!
//! # Backends
//!
//! | type          | content token               | collaborator            |
//! |---------------|-----------------------------|-------------------------|
//! | `JSON`        | inline payload              | none                    |
//! | `TEMPFOLDER`  | generated file name         | none                    |
//! | `FOLDER`      | generated file name         | none                    |
//! | `URL`         | absolute or relative URL    | [`UrlFetcher`]          |
//! | `CAMUNDA`     | document handle             | [`DocumentStoreClient`] |
//! | `CMIS`        | repository object id        | [`CmisConnector`]       |
//! | `GOOGLEDRIVE` | drive file id               | [`DriveConnector`]      |
//!
//! # Example
//!
//! ```rust
//! use filestore_core::StorageDefinition;
//! use filestore_storage::{FileRepository, StorageContext};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = std::env::temp_dir().join("filestore-doc");
//! let repository = FileRepository::new();
//! let context = StorageContext::new();
//!
//! let variable = repository
//!     .create_file_variable(Some(StorageDefinition::folder(dir.display().to_string())))
//!     .with_name("report.pdf")
//!     .with_value(b"%PDF-1.7".to_vec());
//!
//! let reference = repository.save_file_variable(Some(&variable), &context)?;
//! let loaded = repository.load_file_variable(reference.as_ref(), &context)?;
//! assert_eq!(loaded.map(|v| v.into_value()), Some(b"%PDF-1.7".to_vec()));
//!
//! assert!(repository.purge_file_variable(reference.as_ref(), &context)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backends;
mod clients;
mod context;
mod dispatcher;
mod repository;
mod storage;

pub use clients::{
    ClientResult, CmisConnector, CmisSession, DocumentStoreClient, DriveClient, DriveConnector,
    HttpFetcher, RemoteFile, RemoteMetadata, UrlFetcher,
};
pub use context::StorageContext;
pub use dispatcher::Dispatcher;
pub use repository::FileRepository;
pub use storage::Storage;

pub use filestore_error::{BackendError, BackendErrorKind};
