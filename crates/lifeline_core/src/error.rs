//! Error types for the data manager and its world host.
//!
//! Only registration and attachment can fail. A value that cannot be found
//! while a tick is being recorded is reported as `None`, never as an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Key is empty, or has the wrong shape for the entry point used
    #[error("Malformed data key: '{0}'")]
    MalformedKey(String),

    /// A factory is already registered under this key
    #[error("Data key already registered: {0}")]
    AlreadyRegistered(String),

    /// No factory is registered for a requested key
    #[error("Data not available: {0}")]
    Unavailable(String),

    /// The factory for a key declined to build a provider
    #[error("Provider activation failed for {0}")]
    ActivationFailed(String),

    /// The active provider rejected a requested argument
    #[error("Invalid argument '{argument}' for {raw_key}")]
    InvalidArgument { raw_key: String, argument: String },

    /// The manager is already attached to a world
    #[error("Data manager already attached to a world")]
    AlreadyAttached,

    /// A recorded series could not be restored from its text form
    #[error("Malformed series entry: '{0}'")]
    MalformedSeries(String),

    /// The world already hosts a facet with this id
    #[error("Duplicate world facet: {0}")]
    DuplicateFacet(String),
}

pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    #[must_use]
    pub fn malformed<S: Into<String>>(key: S) -> Self {
        Self::MalformedKey(key.into())
    }

    #[must_use]
    pub fn unavailable<S: Into<String>>(key: S) -> Self {
        Self::Unavailable(key.into())
    }

    #[must_use]
    pub fn invalid_argument<R: Into<String>, A: Into<String>>(raw_key: R, argument: A) -> Self {
        Self::InvalidArgument {
            raw_key: raw_key.into(),
            argument: argument.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::unavailable("sim.count");
        assert_eq!(err.to_string(), "Data not available: sim.count");

        let err = DataError::invalid_argument("env.trigger[]", "zz");
        assert_eq!(err.to_string(), "Invalid argument 'zz' for env.trigger[]");
    }
}
