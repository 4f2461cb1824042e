use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A failure raised by a value, typically a capability hook. Passed
    /// through untouched.
    #[error(transparent)]
    Value(#[from] replica_value::Error),

    #[error("Structure exceeds the maximum depth of {limit}")]
    TooDeep { limit: usize },
}
