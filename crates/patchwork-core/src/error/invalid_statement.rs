use super::Error;

/// Error when a statement is invalid.
///
/// This occurs when:
/// - A write resolves to zero columns
/// - The resolved columns and values differ in length
///
/// Either case signals a bug in field resolution rather than bad input.
#[derive(Debug)]
pub(super) struct InvalidStatement {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidStatement(_)))
    }
}
