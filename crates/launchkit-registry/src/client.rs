//! The registry client trait and its HTTP implementation.

use crate::RegistryError;
use async_trait::async_trait;
use launchkit_core::{ParamType, ParamValue};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// One named, typed value, set remotely or failed.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn set_param(&self, name: &str, value: &ParamValue) -> Result<(), RegistryError>;
}

#[derive(Serialize)]
struct SetParamRequest<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: ParamType,
    value: &'a ParamValue,
}

/// JSON-over-HTTP registry client.
pub struct HttpRegistryClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRegistryClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Build a client from a connection string.
    pub fn from_uri(uri: &str) -> Result<Self, RegistryError> {
        let endpoint = Url::parse(uri).map_err(|source| RegistryError::Endpoint {
            uri: uri.to_string(),
            source,
        })?;
        Ok(Self::new(endpoint))
    }

    fn params_url(&self) -> Result<Url, RegistryError> {
        self.endpoint
            .join("api/params")
            .map_err(|source| RegistryError::Endpoint {
                uri: self.endpoint.to_string(),
                source,
            })
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn set_param(&self, name: &str, value: &ParamValue) -> Result<(), RegistryError> {
        let body = SetParamRequest {
            name,
            ty: value.param_type(),
            value,
        };

        debug!(param = name, endpoint = %self.endpoint, "setting parameter");
        let response = self
            .client
            .post(self.params_url()?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Rejected { status, message });
        }

        Ok(())
    }
}
