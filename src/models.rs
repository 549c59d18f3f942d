// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Card Data Models
//!
//! Request and response shapes exchanged with the tap2pay card backend.
//! Field names are camelCase on the wire.
//!
//! ## Model Categories
//!
//! - **Cards**: [`Card`] as returned by the backend, [`CardUpdate`] for
//!   partial updates
//! - **Registration**: [`CardRegistrationRequest`], shared by register and
//!   access
//! - **Outcomes**: [`GatewayResult`] for the operations that report failures
//!   instead of raising them

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Page used by transaction listings when the caller does not choose one.
pub const DEFAULT_TRANSACTIONS_PAGE: u32 = 1;

/// Page size used by transaction listings when the caller does not choose one.
pub const DEFAULT_TRANSACTIONS_LIMIT: u32 = 20;

// =============================================================================
// Card Models
// =============================================================================

/// A payment card held by the backend.
///
/// Cards are created server-side on registration. The gateway never keeps
/// them beyond the request that fetched them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Opaque card identifier.
    pub id: String,
    /// Display name chosen by the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current balance in `currency` units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    /// ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Partial card fields sent by `update_card`. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none() && self.currency.is_none()
    }
}

// =============================================================================
// Registration Models
// =============================================================================

/// Payload for registering a card or opening an access session.
///
/// All values are produced by the wallet and the card reader; the gateway
/// forwards them untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardRegistrationRequest {
    /// Address of the wallet that signed `eth_sign_message`.
    pub signer_address: String,
    /// Hash of the card data read from the chip.
    pub hash_card: String,
    /// Hash of the card PIN.
    pub hash_pin: String,
    /// Wallet signature over the registration message.
    pub eth_sign_message: String,
}

/// Paging for `get_card_transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub page: u32,
    pub limit: u32,
}

impl TransactionQuery {
    /// Fill in the defaults for whichever of `page` and `limit` is absent.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_TRANSACTIONS_PAGE),
            limit: limit.unwrap_or(DEFAULT_TRANSACTIONS_LIMIT),
        }
    }
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Session key returned by `access_card`.
///
/// The backend either answers with a JSON object carrying `hsmKey` or with
/// the key itself as a plain-text body.
pub fn session_key(body: &Value) -> Option<&str> {
    match body {
        Value::String(key) if !key.trim().is_empty() => Some(key.as_str()),
        Value::Object(map) => map
            .get("hsmKey")
            .and_then(Value::as_str)
            .filter(|key| !key.trim().is_empty()),
        _ => None,
    }
}

// =============================================================================
// Outcome Model
// =============================================================================

/// Outcome of an operation that reports failures instead of raising them.
///
/// Serializes as `{"success": true, "data": ..., "message"?: ...}` or
/// `{"success": false, "message": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResult<T> {
    Success { data: T, message: Option<String> },
    Failure { message: String },
}

impl<T> GatewayResult<T> {
    pub fn success(data: T, message: Option<String>) -> Self {
        GatewayResult::Success { data, message }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        GatewayResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayResult::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            GatewayResult::Success { data, .. } => Some(data),
            GatewayResult::Failure { .. } => None,
        }
    }

    /// The server's message on success, or the failure reason.
    pub fn message(&self) -> Option<&str> {
        match self {
            GatewayResult::Success { message, .. } => message.as_deref(),
            GatewayResult::Failure { message } => Some(message.as_str()),
        }
    }

    /// Convert into a `Result`, with the failure message as the error.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            GatewayResult::Success { data, .. } => Ok(data),
            GatewayResult::Failure { message } => Err(message),
        }
    }
}

#[derive(Serialize)]
struct ResultBody<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<T: Serialize> Serialize for GatewayResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            GatewayResult::Success { data, message } => ResultBody {
                success: true,
                data: Some(data),
                message: message.as_deref(),
            },
            GatewayResult::Failure { message } => ResultBody {
                success: false,
                data: None,
                message: Some(message.as_str()),
            },
        };
        body.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_decodes_with_missing_optional_fields() {
        let card: Card = serde_json::from_value(json!({ "id": "card_1", "status": "active" }))
            .expect("card should decode");
        assert_eq!(card.id, "card_1");
        assert!(card.name.is_none());
        assert!(card.balance.is_none());
    }

    #[test]
    fn registration_request_uses_camel_case_fields() {
        let request = CardRegistrationRequest {
            signer_address: "0xabc".to_string(),
            hash_card: "card-hash".to_string(),
            hash_pin: "pin-hash".to_string(),
            eth_sign_message: "0xsig".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "signerAddress": "0xabc",
                "hashCard": "card-hash",
                "hashPin": "pin-hash",
                "ethSignMessage": "0xsig"
            })
        );
    }

    #[test]
    fn card_update_omits_unset_fields() {
        let update = CardUpdate {
            name: Some("Travel".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "name": "Travel" }));
        assert!(CardUpdate::default().is_empty());
    }

    #[test]
    fn transaction_query_defaults_to_first_page_of_twenty() {
        assert_eq!(
            TransactionQuery::default(),
            TransactionQuery { page: 1, limit: 20 }
        );
        assert_eq!(
            TransactionQuery::new(Some(3), None),
            TransactionQuery { page: 3, limit: 20 }
        );
    }

    #[test]
    fn session_key_reads_object_or_plain_body() {
        assert_eq!(session_key(&json!({ "hsmKey": "k-1" })), Some("k-1"));
        assert_eq!(session_key(&json!("k-2")), Some("k-2"));
        assert_eq!(session_key(&json!({ "other": true })), None);
        assert_eq!(session_key(&Value::Null), None);
    }

    #[test]
    fn gateway_result_serializes_to_tagged_shapes() {
        let ok = GatewayResult::success(json!({ "id": "c" }), None);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "success": true, "data": { "id": "c" } })
        );

        let failed: GatewayResult<Value> = GatewayResult::failure("denied");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "success": false, "message": "denied" })
        );
        assert_eq!(failed.clone().into_result(), Err("denied".to_string()));
        assert!(!failed.is_success());
    }
}
