use super::Error;

/// Error when a query result has an unexpected structure.
///
/// This occurs when:
/// - A statement that should return rows returned a count, or vice versa
/// - A row lacks a column the record declares
///
/// The database returned valid data, but its shape doesn't match what the
/// operation expected.
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidResult(_)))
    }
}
