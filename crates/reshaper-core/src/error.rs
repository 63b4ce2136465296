//! Error types for the Reshaper core library
//!
//! Every failure the engine can report happens while a template is being
//! ingested or while a hand-built path mapping is turned into a tree.
//! A source key missing from the input is never an error.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for Reshaper operations
#[derive(Error, Debug)]
pub enum Error {
    /// The template root (or a value handed in as a template) is not an object
    #[error("Invalid template: {message}")]
    InvalidTemplate {
        message: String,
    },

    /// A template leaf is neither a source-key string nor a nested object
    #[error("Invalid template leaf at '{path}': expected a source key name, found {found}")]
    InvalidLeaf {
        path: String,
        found: JsonKind,
    },

    /// A template key contains the path separator
    #[error("Template key '{key}' at '{path}' contains the path separator '{separator}'")]
    SeparatorInKey {
        path: String,
        key: String,
        separator: char,
    },

    /// Two paths in a mapping overlap so that one would replace the other's container
    #[error("Path conflict at '{path}': {message}")]
    PathConflict {
        path: String,
        message: String,
    },

    /// A path with no segments was handed to the tree builder
    #[error("Empty path cannot address an output field")]
    EmptyPath,

    /// Input handed in as an untyped value is not an object
    #[error("Invalid input: expected an object, found {found}")]
    InvalidInput {
        found: JsonKind,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse kind of a JSON value, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a JSON value
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonKind::Null,
            serde_json::Value::Bool(_) => JsonKind::Bool,
            serde_json::Value::Number(_) => JsonKind::Number,
            serde_json::Value::String(_) => JsonKind::String,
            serde_json::Value::Array(_) => JsonKind::Array,
            serde_json::Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Bool => write!(f, "boolean"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
            JsonKind::Object => write!(f, "object"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
