// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the tap2pay card API.

use std::future::Future;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use super::message::failure_message;
use super::routes::Endpoint;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::{Card, CardRegistrationRequest, CardUpdate, GatewayResult, TransactionQuery};

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";
const ACCESS_ACCEPT: &str = "application/json, text/plain";

/// Signed-request gateway to the card backend.
///
/// Every call is a single request. The gateway keeps no state between calls
/// beyond its base URL and the pooled HTTP client, so clones can be shared
/// freely across tasks.
#[derive(Debug, Clone)]
pub struct CardGateway {
    base_url: Url,
    http: Client,
}

/// Body of `update_card`.
#[derive(Serialize)]
struct SignedUpdate<'a> {
    signature: &'a str,
    updates: &'a CardUpdate,
}

impl CardGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .default_headers(config.default_headers().clone())
            .build()?;

        Ok(Self {
            base_url: config.base_url().clone(),
            http,
        })
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(GatewayConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========== Reporting Operations ==========
    //
    // Failures come back as `GatewayResult::Failure` with a readable message.

    /// Register a card for the signing wallet.
    ///
    /// On success `data` is the backend's response body.
    pub async fn register_card(&self, request: &CardRegistrationRequest) -> GatewayResult<Value> {
        report("register_card", async {
            let builder = self.request(Method::POST, &Endpoint::CardRegister)?;
            execute(with_json(builder, request)?).await
        })
        .await
    }

    /// Open an access session for a registered card.
    ///
    /// The backend may answer with JSON or with the session key as plain
    /// text; see [`crate::models::session_key`].
    pub async fn access_card(&self, request: &CardRegistrationRequest) -> GatewayResult<Value> {
        report("access_card", async {
            let builder = self
                .request(Method::POST, &Endpoint::CardAccess)?
                .header(ACCEPT, ACCESS_ACCEPT);
            execute(with_json(builder, request)?).await
        })
        .await
    }

    // ========== Propagating Operations ==========
    //
    // Failures are logged and returned to the caller unchanged.

    pub async fn list_cards(&self, signature: &str) -> Result<Vec<Card>, GatewayError> {
        propagate("list_cards", async {
            let body = self.signed_read(&Endpoint::Cards, signature).await?;
            decode::<Vec<Card>>(body)
        })
        .await
    }

    pub async fn get_card_details(
        &self,
        card_id: &str,
        signature: &str,
    ) -> Result<Card, GatewayError> {
        propagate("get_card_details", async {
            let body = self.signed_read(&Endpoint::Card(card_id), signature).await?;
            decode::<Card>(body)
        })
        .await
    }

    /// Page through a card's transactions. `page` defaults to 1 and `limit`
    /// to 20.
    pub async fn get_card_transactions(
        &self,
        card_id: &str,
        signature: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, GatewayError> {
        let endpoint = Endpoint::CardTransactions(card_id, TransactionQuery::new(page, limit));
        propagate(
            "get_card_transactions",
            self.signed_read(&endpoint, signature),
        )
        .await
    }

    /// Analytics for one card, or the overview across all cards when
    /// `card_id` is `None`.
    pub async fn get_card_analytics(
        &self,
        card_id: Option<&str>,
        signature: &str,
    ) -> Result<Value, GatewayError> {
        let endpoint = Endpoint::analytics(card_id);
        propagate(
            "get_card_analytics",
            self.signed_read(&endpoint, signature),
        )
        .await
    }

    pub async fn delete_card(&self, card_id: &str, signature: &str) -> Result<Value, GatewayError> {
        propagate("delete_card", async {
            let builder = self.request(Method::DELETE, &Endpoint::Card(card_id))?;
            execute(with_signature(builder, signature)).await
        })
        .await
    }

    pub async fn update_card(
        &self,
        card_id: &str,
        updates: &CardUpdate,
        signature: &str,
    ) -> Result<Value, GatewayError> {
        propagate("update_card", async {
            let builder = self.request(Method::PATCH, &Endpoint::Card(card_id))?;
            let body = SignedUpdate { signature, updates };
            execute(with_json(builder, &body)?).await
        })
        .await
    }

    // ========== Transport ==========

    fn request(&self, method: Method, endpoint: &Endpoint<'_>) -> Result<RequestBuilder, GatewayError> {
        let url = endpoint.url(&self.base_url)?;
        debug!(method = %method, path = %url.path(), "Card gateway: sending request");
        Ok(self.http.request(method, url))
    }

    /// POST with the signature as the whole body.
    async fn signed_read(
        &self,
        endpoint: &Endpoint<'_>,
        signature: &str,
    ) -> Result<Value, GatewayError> {
        let builder = self.request(Method::POST, endpoint)?;
        execute(with_signature(builder, signature)).await
    }
}

fn with_signature(builder: RequestBuilder, signature: &str) -> RequestBuilder {
    builder
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .body(signature.to_string())
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<RequestBuilder, GatewayError> {
    let body = serde_json::to_vec(body).map_err(|e| GatewayError::Serialize(e.to_string()))?;
    Ok(builder.header(CONTENT_TYPE, APPLICATION_JSON).body(body))
}

async fn execute(builder: RequestBuilder) -> Result<Value, GatewayError> {
    let response = builder.send().await?;
    let status = response.status();
    finish(status, response.text().await)
}

/// A failed status wins over a failed body read.
fn finish(status: StatusCode, text: Result<String, reqwest::Error>) -> Result<Value, GatewayError> {
    if !status.is_success() {
        let body = text.map(|t| decode_body(&t)).unwrap_or(Value::Null);
        return Err(GatewayError::Status { status, body });
    }
    Ok(decode_body(&text?))
}

/// JSON when the body parses as JSON, otherwise the text as a JSON string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

async fn report<F>(operation: &'static str, call: F) -> GatewayResult<Value>
where
    F: Future<Output = Result<Value, GatewayError>>,
{
    match call.await {
        Ok(body) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            GatewayResult::success(body, message)
        }
        Err(e) => {
            let message = failure_message(&e);
            warn!(operation, error = %e, message = %message, "Card gateway: call failed");
            GatewayResult::failure(message)
        }
    }
}

async fn propagate<T, F>(operation: &'static str, call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    call.await.map_err(|e| {
        error!(operation, error = %e, "Card gateway: call failed");
        e
    })
}
