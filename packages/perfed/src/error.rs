use std::io;

use thiserror::Error;

/// Errors that can occur when operating on timers, collections and registries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A timer was stopped or read before it was started.
    #[error("timer '{name}' has not been started")]
    IllegalState {
        /// Name of the timer that was not started.
        name: String,
    },

    /// No timer or registry entry exists under the given name.
    #[error("{kind} '{name}' does not exist")]
    NotFound {
        /// What was being looked up, e.g. "timer" or "collection".
        kind: &'static str,

        /// The name that was looked up.
        name: String,
    },

    /// A timer or registry entry already exists under the given name.
    #[error("{kind} '{name}' already exists")]
    AlreadyExists {
        /// What was being created, e.g. "timer" or "collection".
        kind: &'static str,

        /// The name that is already taken.
        name: String,
    },

    /// The caller provided a unit, format or write mode that is not recognized.
    #[error("invalid argument: '{invalid_value}' is invalid: {problem}")]
    InvalidArgument {
        /// The value that was rejected.
        invalid_value: String,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// Statistics were requested from a collection that holds no timers.
    #[error("collection '{name}' holds no timers")]
    EmptyCollection {
        /// Name of the empty collection.
        name: String,
    },

    /// A decorated call was made while the collection it records into was borrowed elsewhere.
    #[error("collection '{name}' is borrowed and cannot record another call")]
    CollectionInUse {
        /// Name of the borrowed collection.
        name: String,
    },

    /// Writing to a file or output sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Encoding results as JSON failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(invalid_value: &str, problem: impl Into<String>) -> Self {
        Self::InvalidArgument {
            invalid_value: invalid_value.to_string(),
            problem: problem.into(),
        }
    }
}

/// A specialized `Result` type for timer operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
