use std::any::Any;

use thiserror::Error;

/// Signal raised after a fatal log or a failed check has been written.
///
/// The failure travels as a panic payload (see [`std::panic::panic_any`]), so
/// callers that want to survive it wrap the code in
/// [`std::panic::catch_unwind`] and recover the value with
/// [`Failure::from_panic`].
///
/// # Examples
///
/// ```
/// # use benchlog::{check, Failure};
/// let result = std::panic::catch_unwind(|| {
///     check!(1 + 1 == 3; "arithmetic is broken");
/// });
/// let payload = result.unwrap_err();
/// let failure = Failure::from_panic(payload.as_ref()).unwrap();
/// assert!(failure.is_check());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// A `check!` condition evaluated to false
    #[error("check failed: {message}")]
    Check { message: String },
    /// A statement was logged at `Fatal` severity
    #[error("fatal: {message}")]
    Fatal { message: String },
}

impl Failure {
    pub fn is_check(&self) -> bool {
        matches!(self, Failure::Check { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal { .. })
    }

    /// The text that was written to the sink before the failure was raised.
    pub fn message(&self) -> &str {
        match self {
            Failure::Check { message } | Failure::Fatal { message } => message,
        }
    }

    /// Extracts a `Failure` from a caught panic payload.
    ///
    /// Returns `None` if the panic was not raised by this crate.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Failure> {
        payload.downcast_ref::<Failure>()
    }
}

/// Returned when parsing a [`Severity`](crate::Severity) from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{input}`, expected one of INFO, WARN, ERROR, FATAL, CHECK")]
pub struct ParseSeverityError {
    pub input: String,
}
