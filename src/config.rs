// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Configuration
//!
//! Transport settings shared by every gateway call. Configuration is loaded
//! from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WALLE_API_BASE_URL` | Origin of the card backend | `http://localhost:8080` |
//! | `WALLE_AUTH_TOKEN` | Session token sent as `Authorization: Bearer` | Optional |
//! | `WALLE_SIGNATURE` | Signature used by the command-line client | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::error::GatewayError;

/// Environment variable name for the backend origin.
pub const API_BASE_URL_ENV: &str = "WALLE_API_BASE_URL";

/// Environment variable name for the optional session token.
pub const AUTH_TOKEN_ENV: &str = "WALLE_AUTH_TOKEN";

/// Environment variable name for the command-line signature.
pub const SIGNATURE_ENV: &str = "WALLE_SIGNATURE";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Base URL and default headers for a [`crate::gateway::CardGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    base_url: Url,
    default_headers: HeaderMap,
}

impl GatewayConfig {
    /// Build a configuration for the given backend origin.
    ///
    /// The URL must be absolute and able to carry path segments.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "{base_url}: cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            default_headers: HeaderMap::new(),
        })
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = non_empty(lookup(API_BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let config = Self::new(&base_url)?;
        match non_empty(lookup(AUTH_TOKEN_ENV)) {
            Some(token) => config.with_bearer_token(&token),
            None => Ok(config),
        }
    }

    /// Add a header sent on every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidHeader(format!("{name}: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_bearer_token(mut self, token: &str) -> Result<Self, GatewayError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| GatewayError::InvalidHeader(format!("{AUTHORIZATION}: {e}")))?;
        value.set_sensitive(true);
        self.default_headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
