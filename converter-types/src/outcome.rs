//! Value-plus-error result of a public converter operation.

use crate::error::ConverterError;

/// Result of a public operation: always a value, plus the error (if any).
///
/// On failure `value` holds the operation's sentinel (`0.0` for amounts,
/// `(1.0, 0.0)` for rates, `(1.0, {})` for dynamics), so callers must check
/// `error` rather than infer failure from the value. Each call produces a
/// fresh `Outcome`; there is no error state carried between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub error: Option<ConverterError>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn failed(sentinel: T, error: ConverterError) -> Self {
        Self {
            value: sentinel,
            error: Some(error),
        }
    }

    /// Folds a `Result` into an outcome, substituting `sentinel` on error.
    pub fn from_result(result: Result<T, ConverterError>, sentinel: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(err) => Self::failed(sentinel(), err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, ConverterError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}
