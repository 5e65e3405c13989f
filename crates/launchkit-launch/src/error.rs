//! Launch-stage errors.

use launchkit_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to set parameter {name}: {source}")]
    SetParam {
        name: String,
        #[source]
        source: RegistryError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
