//! HTTP transport for orchestrator calls.

use std::future::Future;

use log::{debug, trace};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;

use super::config::OrchestratorConfig;
use crate::error::{OrchestratorError, Result};

/// Posts a JSON body to an API path and returns the decoded JSON reply.
pub trait JsonTransport: Send + Sync {
    fn post(&self, path: &str, body: &Value) -> impl Future<Output = Result<Value>> + Send;
}

/// [`JsonTransport`] over HTTPS with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &OrchestratorConfig) -> Result<Self> {
        let auth = format!("Token {}", config.token.expose_secret());
        let mut auth = HeaderValue::from_str(&auth).map_err(|_| OrchestratorError::InvalidConfig {
            message: "token contains characters not allowed in a header".to_string(),
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()
            .map_err(OrchestratorError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl JsonTransport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        trace!("request body: {}", body);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(OrchestratorError::Http)?;

        let status = resp.status();
        let text = resp.text().await.map_err(OrchestratorError::Http)?;

        if !status.is_success() {
            return Err(OrchestratorError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        trace!("{} returned {} bytes", path, text.len());
        Ok(serde_json::from_str(&text).map_err(OrchestratorError::Json)?)
    }
}
