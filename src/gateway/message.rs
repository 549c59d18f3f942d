// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Human-readable failure messages for reporting operations.
//!
//! Strategies run in order and the first non-empty message wins:
//!
//! 1. the `message` field of the error response body
//! 2. the error response body itself
//! 3. the error's own message
//! 4. [`FALLBACK_MESSAGE`]

use serde_json::Value;

use crate::error::GatewayError;

/// Message used when no strategy finds anything to say.
pub const FALLBACK_MESSAGE: &str = "Network error occurred";

/// Extracts a candidate message from a failed call.
pub type MessageStrategy = fn(&GatewayError) -> Option<String>;

/// Strategies in precedence order.
pub const MESSAGE_STRATEGIES: [MessageStrategy; 3] =
    [body_message_field, raw_body, error_message];

/// Message for a failed reporting operation. Never empty.
pub fn failure_message(err: &GatewayError) -> String {
    first_message(err, &MESSAGE_STRATEGIES)
}

fn first_message(err: &GatewayError, strategies: &[MessageStrategy]) -> String {
    strategies
        .iter()
        .find_map(|strategy| strategy(err).filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

fn body_message_field(err: &GatewayError) -> Option<String> {
    match err.response_body()?.get("message")? {
        Value::String(message) => Some(message.clone()),
        // Validation failures arrive as a list of messages.
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        Value::Number(code) => Some(code.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn raw_body(err: &GatewayError) -> Option<String> {
    match err.response_body()? {
        Value::Null => None,
        Value::String(body) => Some(body.clone()),
        // `{}` has nothing to show; fall through to the error text.
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn error_message(err: &GatewayError) -> Option<String> {
    Some(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn status_error(body: Value) -> GatewayError {
        GatewayError::Status {
            status: StatusCode::BAD_REQUEST,
            body,
        }
    }

    #[test]
    fn message_field_wins_over_everything_else() {
        let err = status_error(json!({ "message": "PIN hash mismatch", "code": 7 }));
        assert_eq!(failure_message(&err), "PIN hash mismatch");
    }

    #[test]
    fn message_list_is_joined() {
        let err = status_error(json!({ "message": ["hashPin is required", "hashCard is required"] }));
        assert_eq!(
            failure_message(&err),
            "hashPin is required; hashCard is required"
        );
    }

    #[test]
    fn scalar_message_field_is_rendered_directly() {
        let err = status_error(json!({ "code": "E", "message": 42 }));
        assert_eq!(failure_message(&err), "42");
    }

    #[test]
    fn raw_text_body_is_used_without_message_field() {
        let err = status_error(json!("card already registered"));
        assert_eq!(failure_message(&err), "card already registered");
    }

    #[test]
    fn raw_json_body_is_used_when_message_field_is_blank() {
        let err = status_error(json!({ "message": "  ", "error": "Bad Request" }));
        assert_eq!(
            failure_message(&err),
            r#"{"error":"Bad Request","message":"  "}"#
        );
    }

    #[test]
    fn error_message_is_used_without_a_body() {
        let err = status_error(Value::Null);
        assert_eq!(failure_message(&err), "request failed with status code 400");

        let err = status_error(json!({}));
        assert_eq!(failure_message(&err), "request failed with status code 400");
    }

    #[test]
    fn fallback_applies_when_no_strategy_answers() {
        fn silent(_: &GatewayError) -> Option<String> {
            None
        }
        fn blank(_: &GatewayError) -> Option<String> {
            Some(String::new())
        }
        let err = status_error(Value::Null);
        assert_eq!(first_message(&err, &[silent, blank]), FALLBACK_MESSAGE);
        assert_eq!(first_message(&err, &[]), FALLBACK_MESSAGE);
    }
}
