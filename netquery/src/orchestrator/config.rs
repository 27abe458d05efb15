//! Orchestrator connection settings.

use std::env;
use std::time::Duration;

use log::warn;
use secrecy::SecretString;

use crate::error::{OrchestratorError, Result};

pub const TOKEN_VAR: &str = "VCO_TOKEN";
pub const LEGACY_TOKEN_VAR: &str = "VELO_TOKEN";
pub const URL_VAR: &str = "VCO_URL";
pub const ENTERPRISE_ID_VAR: &str = "VCO_ENTERPRISE_ID";
pub const INSECURE_VAR: &str = "VCO_INSECURE";

/// Where and how to reach a VeloCloud Orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// REST root, e.g. `https://vco.example.net/portal/rest`.
    pub base_url: String,

    /// API token sent as `Authorization: Token <token>`.
    pub token: SecretString,

    /// Enterprise scoped by every request (default: 1).
    pub enterprise_id: i64,

    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,

    /// Per-request timeout (default: 30s).
    pub timeout: Duration,
}

impl OrchestratorConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: SecretString::from(token.into()),
            enterprise_id: 1,
            accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn enterprise_id(mut self, id: i64) -> Self {
        self.enterprise_id = id;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `VCO_URL`, `VCO_TOKEN`, `VCO_ENTERPRISE_ID` and `VCO_INSECURE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token = match get(TOKEN_VAR) {
            Some(token) => token,
            None => {
                let legacy = get(LEGACY_TOKEN_VAR).ok_or(OrchestratorError::MissingToken {
                    variable: TOKEN_VAR,
                })?;
                warn!("{} is deprecated, use {}", LEGACY_TOKEN_VAR, TOKEN_VAR);
                legacy
            }
        };

        let base_url = get(URL_VAR).ok_or_else(|| OrchestratorError::InvalidConfig {
            message: format!("{URL_VAR} is not set"),
        })?;

        let mut config = Self::new(base_url, token);

        if let Some(id) = get(ENTERPRISE_ID_VAR) {
            config.enterprise_id =
                id.trim()
                    .parse()
                    .map_err(|_| OrchestratorError::InvalidConfig {
                        message: format!("{ENTERPRISE_ID_VAR} is not a number: {id:?}"),
                    })?;
        }

        if let Some(flag) = get(INSECURE_VAR) {
            config.accept_invalid_certs = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(config)
    }
}
