use super::Error;

/// Error when a logical field name cannot be resolved against a record.
///
/// This occurs when an include list or field mask names a field that the
/// record type does not declare, or that is declared but not persisted.
#[derive(Debug)]
pub(super) struct FieldResolutionError {
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for FieldResolutionError {}

impl core::fmt::Display for FieldResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field resolution failed for `{}`: {}",
            self.field, self.reason
        )
    }
}

impl Error {
    /// Creates a field resolution error for `field`.
    pub fn field_resolution(field: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FieldResolution(FieldResolutionError {
            field: field.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a field resolution error.
    pub fn is_field_resolution(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::FieldResolution(_)))
    }
}
