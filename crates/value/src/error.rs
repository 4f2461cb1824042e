use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A function or capability hook failed. Carries the failure message
    /// unchanged so callers can surface it as-is.
    #[error("{0}")]
    Thrown(String),

    #[error("Invalid regular expression: /{pattern}/{flags}: {reason}")]
    InvalidRegExp {
        pattern: String,
        flags: String,
        reason: String,
    },

    #[error("Converting circular structure to JSON")]
    Circular,

    #[error("Value is not JSON-serializable: {0}")]
    NotSerializable(&'static str),
}

impl Error {
    /// Shorthand for a [`Error::Thrown`] failure.
    pub fn thrown(message: impl Into<String>) -> Self {
        Error::Thrown(message.into())
    }
}
