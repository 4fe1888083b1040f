//! File variable reference (de)serialization errors.

/// Specific reference encoding/decoding conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ReferenceErrorKind {
    /// Neither the raw input nor its unescaped form parsed
    #[display("Cannot decode reference: {}", _0)]
    Decode(String),

    /// The reference could not be serialized
    #[display("Cannot encode reference: {}", _0)]
    Encode(String),

    /// Input is not a string, object, or single-element array
    #[display("Unsupported reference input: {}", _0)]
    UnsupportedInput(String),
}

/// Reference error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reference Error: {} at line {} in {}", kind, line, file)]
pub struct ReferenceError {
    kind: ReferenceErrorKind,
    line: u32,
    file: &'static str,
}

impl ReferenceError {
    /// Create a new reference error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ReferenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReferenceErrorKind {
        &self.kind
    }
}
