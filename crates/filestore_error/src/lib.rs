//! Error types for the filestore library.
//!
//! This crate provides the error taxonomy shared by every filestore crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Failure categories map to types as follows:
//!
//! | category               | type                          |
//! |------------------------|-------------------------------|
//! | malformed definition   | [`DefinitionError`]           |
//! | unsupported operation  | [`UnsupportedOperationError`] |
//! | unsupported backend    | [`UnsupportedBackendError`]   |
//! | missing input          | [`MissingInputError`]         |
//! | backend failure        | [`BackendError`]              |
//!
//! # Examples
//!
//! ```
//! use filestore_error::{BackendError, BackendErrorKind, FilestoreResult};
//!
//! fn read_artifact() -> FilestoreResult<Vec<u8>> {
//!     Err(BackendError::new(
//!         "TempFolder",
//!         "from_storage",
//!         BackendErrorKind::NotFound("report_1.pdf".to_string()),
//!     ))?
//! }
//!
//! assert!(read_artifact().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod definition;
mod error;
mod missing_input;
mod reference;
mod unsupported;

pub use backend::{BackendError, BackendErrorKind};
pub use config::ConfigError;
pub use definition::{DefinitionError, DefinitionErrorKind};
pub use error::{FilestoreError, FilestoreErrorKind, FilestoreResult};
pub use missing_input::MissingInputError;
pub use reference::{ReferenceError, ReferenceErrorKind};
pub use unsupported::{UnsupportedBackendError, UnsupportedOperationError};
