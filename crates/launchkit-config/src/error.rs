//! Launch-file parsing errors.

use launchkit_core::ValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("KDL parse error: {0}")]
    Parse(#[from] kdl::KdlError),

    #[error("invalid <{tag}> tag: missing required '{attr}' attribute")]
    MissingAttribute { tag: String, attr: String },

    #[error("invalid <{tag}> tag: '{attr}' attribute cannot be empty")]
    EmptyAttribute { tag: String, attr: String },

    #[error("invalid <{tag}> tag: unknown attribute '{attr}'")]
    UnknownAttribute { tag: String, attr: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("undefined argument: {0}")]
    UndefinedArg(String),

    #[error("undefined environment variable: {0}")]
    UndefinedEnv(String),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
