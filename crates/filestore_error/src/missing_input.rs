//! Missing input error.

/// A required argument was absent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Missing Input: {} at line {} in {}", argument, line, file)]
pub struct MissingInputError {
    /// Name of the absent argument
    pub argument: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MissingInputError {
    /// Create a new MissingInputError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use filestore_error::MissingInputError;
    ///
    /// let err = MissingInputError::new("file variable storage definition");
    /// assert!(err.argument.contains("storage definition"));
    /// ```
    #[track_caller]
    pub fn new(argument: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            argument: argument.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
