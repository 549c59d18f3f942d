// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transport-level gateway errors.

use reqwest::StatusCode;
use serde_json::Value;

/// Errors raised by the card gateway.
///
/// Propagating operations hand these back to the caller unchanged.
/// Registration and access fold them into a [`crate::models::GatewayResult`]
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (connect, TLS, IO).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: Value },

    /// A 2xx body did not match the expected shape.
    #[error("response body was invalid: {0}")]
    Decode(String),

    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    #[error("invalid default header: {0}")]
    InvalidHeader(String),

    #[error("request body could not be encoded: {0}")]
    Serialize(String),

    #[error("gateway configuration missing: {0}")]
    MissingConfig(String),
}

impl GatewayError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Decoded body of the failed response, if one was received.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            GatewayError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_error_displays_status_code() {
        let err = GatewayError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: Value::Null,
        };
        assert_eq!(err.to_string(), "request failed with status code 502");
    }

    #[test]
    fn accessors_expose_status_and_body() {
        let err = GatewayError::Status {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "card not found" }),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err.response_body().and_then(|b| b.get("message")),
            Some(&json!("card not found"))
        );

        let decode = GatewayError::Decode("expected array".to_string());
        assert_eq!(decode.status(), None);
        assert!(decode.response_body().is_none());
    }
}
