use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of importing a styleset. Anything below the top-level gate
/// is corrected field by field instead of failing.
#[derive(Debug, Error)]
pub enum StylesetError {
    #[error("styleset is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("styleset must be a JSON object")]
    NotAnObject,

    #[error("unsupported styleset version: {0}")]
    UnsupportedVersion(String),
}

/// Failure reported by an external paginator.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("paginator failed: {0}")]
pub struct CollaboratorError(pub String);

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Styleset(#[from] StylesetError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown style key: {0}")]
    UnknownStyleKey(String),

    #[error("invalid value for {key}: {value}")]
    InvalidStyleValue { key: &'static str, value: String },

    #[error("unknown {kind}: {name}")]
    UnknownPreset { kind: &'static str, name: String },

    #[error("unknown toolbar action: {0}")]
    UnknownAction(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
