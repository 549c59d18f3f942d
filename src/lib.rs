// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Walle Card Gateway - Signed-Request Client for the Tap2Pay Card API
//!
//! This crate wraps the card backend behind typed async calls. The caller
//! signs; the gateway forwards the signature with every request and maps
//! responses into Rust types.
//!
//! ## Modules
//!
//! - `gateway` - The card client, endpoint catalogue and failure messages
//! - `models` - Card, registration and outcome types
//! - `config` - Base URL and default headers, loaded from the environment
//! - `error` - Transport-level errors
//! - `logging` - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::CardGateway;
pub use models::{Card, CardRegistrationRequest, CardUpdate, GatewayResult};
