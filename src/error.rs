//! Defines a more readable error type, and the typed errors raised before any request is sent
use core::error::Error;
use thiserror::Error;

/// Custom error type
pub type BoxedError = Box<dyn Error + Send + Sync>;

/// Errors raised while reading the configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory environment variable is not defined
    #[error("env variable {0} is not defined")]
    MissingVariable(&'static str),
    /// An environment variable is defined with an unsupported value
    #[error("env variable {name} is set to '{value}', expected {expected}")]
    InvalidVariable {
        /// Variable name
        name: &'static str,
        /// Value found in the environment
        value: String,
        /// What we would have accepted
        expected: &'static str,
    },
}

/// Errors raised when a [`ResourceData`](crate::resource::data::ResourceData) doesn't match its schema
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The attribute is not part of the schema
    #[error("unknown attribute \"{0}\"")]
    UnknownAttribute(String),
    /// A required attribute is missing or empty
    #[error("the attribute \"{0}\" is required")]
    MissingAttribute(&'static str),
    /// The attribute holds a value of the wrong type
    #[error("the attribute \"{name}\" must be a {expected}")]
    UnexpectedType {
        /// Attribute name
        name: &'static str,
        /// Expected type
        expected: &'static str,
    },
    /// The attribute value is rejected by the attribute validator
    #[error("invalid value for \"{name}\": {reason}")]
    InvalidValue {
        /// Attribute name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
