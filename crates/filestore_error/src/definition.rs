//! Storage definition errors.

/// Ways a storage definition string can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DefinitionErrorKind {
    /// The prefix before the delimiter is not one of the known storage types
    #[display("Unknown storage type '{}' in definition [{}]", storage_type, definition)]
    UnknownType {
        /// The prefix that failed to match
        storage_type: String,
        /// The full definition string
        definition: String,
    },

    /// The storage type requires a complement but none was given
    #[display("Storage type {} requires a complement", _0)]
    MissingComplement(String),

    /// The structured complement could not be parsed
    #[display("Invalid complement for storage type {}: {}", storage_type, reason)]
    InvalidComplement {
        /// The storage type whose complement failed
        storage_type: String,
        /// Why parsing failed
        reason: String,
    },
}

/// Malformed storage definition with location tracking.
///
/// # Examples
///
/// ```
/// use filestore_error::{DefinitionError, DefinitionErrorKind};
///
/// let err = DefinitionError::new(DefinitionErrorKind::MissingComplement("FOLDER".to_string()));
/// assert!(format!("{}", err).contains("requires a complement"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed Definition: {} at line {} in {}", kind, line, file)]
pub struct DefinitionError {
    kind: DefinitionErrorKind,
    line: u32,
    file: &'static str,
}

impl DefinitionError {
    /// Create a new definition error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DefinitionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DefinitionErrorKind {
        &self.kind
    }
}
