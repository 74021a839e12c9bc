//! Verification service transport

use crate::model::{RequestBody, VerificationRequest};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default verification service host
pub const DEFAULT_HOST_URL: &str = "http://localhost:8000";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an endpoint path such as `/testimage`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(std::env::var("MISAI_HOST_URL").unwrap_or_else(|_| DEFAULT_HOST_URL.to_string()))
    }
}

/// Sends a verification request and yields the raw success body
///
/// Implementations map network failures to [`ClientError::Transport`] and
/// non-2xx statuses to [`ClientError::Status`]; decoding is left to the
/// modality adapter.
#[async_trait(?Send)]
pub trait VerificationBackend {
    async fn dispatch(&self, request: &VerificationRequest) -> ClientResult<Vec<u8>>;
}

/// HTTP backend built on reqwest. Works natively and in the browser.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait(?Send)]
impl VerificationBackend for HttpBackend {
    async fn dispatch(&self, request: &VerificationRequest) -> ClientResult<Vec<u8>> {
        let url = self.config.endpoint(&request.path());
        info!("Sending {} verification request to {}", request.modality(), url);

        let builder = match request.body() {
            RequestBody::Json(body) => self.client.post(&url).json(&body),
            RequestBody::Multipart { field, upload } => {
                let mut part = Part::bytes(upload.data.clone()).file_name(upload.file_name.clone());
                if let Some(content_type) = &upload.content_type {
                    part = part
                        .mime_str(content_type)
                        .map_err(|e| ClientError::Transport(e.to_string()))?;
                }
                self.client.post(&url).multipart(Form::new().part(field, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!("Verification service answered {}", status);

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
