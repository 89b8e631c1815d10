//! Error and diagnostic types.
//!
//! [`ParamError`] covers every recoverable failure on a single parameter or
//! property. These never abort a load or a batch: they are logged through
//! [`ParamError::report`] and collected into reports. [`Error`] is reserved
//! for operations that fail as a whole.

use std::path::PathBuf;

use sdf_param_codec::ParseError;
use tracing::{error, warn};

use crate::types::ParamType;

pub type Result<T> = std::result::Result<T, Error>;

/// How loudly a diagnostic is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable failure on one parameter or property.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("parameter [{key}]: {source}")]
    Parse {
        key: String,
        #[source]
        source: ParseError,
    },

    #[error("parameter [{key}] is a [{stored}], attempting to get as a [{requested}]")]
    TypeMismatch {
        key: String,
        stored: ParamType,
        requested: ParamType,
    },

    #[error("unknown key [{0}]")]
    UnknownKey(String),

    #[error("required parameter [{0}] is not set")]
    UnmetRequirement(String),

    #[error("key [{0}] is read-only")]
    ReadOnlyKey(String),

    #[error("named parameter [{0}] carries no value")]
    EmptyValue(String),

    #[error("value of [{0}] is not a scalar or a sequence of scalars")]
    NotALiteral(String),
}

impl ParamError {
    pub fn severity(&self) -> Severity {
        match self {
            ParamError::Parse { .. }
            | ParamError::TypeMismatch { .. }
            | ParamError::UnmetRequirement(_)
            | ParamError::NotALiteral(_) => Severity::Error,
            ParamError::UnknownKey(_) | ParamError::ReadOnlyKey(_) | ParamError::EmptyValue(_) => {
                Severity::Warning
            }
        }
    }

    /// The parameter or property key this diagnostic is about.
    pub fn key(&self) -> &str {
        match self {
            ParamError::Parse { key, .. } | ParamError::TypeMismatch { key, .. } => key,
            ParamError::UnknownKey(key)
            | ParamError::UnmetRequirement(key)
            | ParamError::ReadOnlyKey(key)
            | ParamError::EmptyValue(key)
            | ParamError::NotALiteral(key) => key,
        }
    }

    /// Emit this diagnostic on the log channel at its severity.
    pub fn report(&self) {
        match self.severity() {
            Severity::Warning => warn!(key = self.key(), "{}", self),
            Severity::Error => error!(key = self.key(), "{}", self),
        }
    }
}

/// Failures that abort a whole operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("required parameters not set: {}", .0.join(", "))]
    UnmetRequirements(Vec<String>),

    #[error("element [{element}] has no parameter [{key}]")]
    MissingProperty { element: String, key: String },

    #[error(transparent)]
    Param(#[from] ParamError),
}
