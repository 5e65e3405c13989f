//! Registry client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry endpoint {uri:?}: {source}")]
    Endpoint {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registry rejected parameter: status {status}: {message}")]
    Rejected { status: u16, message: String },
}
