// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Card Gateway
//!
//! Typed client for the tap2pay card backend. Every call forwards the
//! caller's signature and issues exactly one request.
//!
//! ## Operation Categories
//!
//! - **Reporting** (`register_card`, `access_card`): never fail; errors are
//!   folded into a [`GatewayResult`](crate::models::GatewayResult) whose
//!   message follows the precedence in [`message`]
//! - **Propagating** (`list_cards`, `get_card_details`,
//!   `get_card_transactions`, `get_card_analytics`, `delete_card`,
//!   `update_card`): errors are logged and returned as
//!   [`GatewayError`](crate::error::GatewayError)
//!
//! ## Signature Placement
//!
//! Reads send the signature as the whole `text/plain` body. Register,
//! access and update send JSON bodies, update carrying the signature as one
//! field next to the changes. Delete sends the signature as a `text/plain`
//! body on the `DELETE` request.

pub mod client;
pub mod message;
pub mod routes;

pub use client::CardGateway;
pub use message::{failure_message, FALLBACK_MESSAGE};
pub use routes::Endpoint;
