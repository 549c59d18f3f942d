// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Endpoint catalogue for the tap2pay card API.

use url::Url;

use crate::error::GatewayError;
use crate::models::TransactionQuery;

/// Versioned prefix shared by every card endpoint.
pub const BASE_PATH: [&str; 2] = ["v2", "tap2pay"];

/// A card API endpoint, resolved against the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `/cards`
    Cards,
    /// `/card-register`
    CardRegister,
    /// `/card-access`
    CardAccess,
    /// `/card/{id}`
    Card(&'a str),
    /// `/card/{id}/transactions?page&limit`
    CardTransactions(&'a str, TransactionQuery),
    /// `/card/{id}/analytics`
    CardAnalytics(&'a str),
    /// `/analytics/overview`
    AnalyticsOverview,
}

impl<'a> Endpoint<'a> {
    /// Analytics for one card when an id is given, otherwise the overview
    /// across all cards. An empty id still selects the per-card endpoint.
    pub fn analytics(card_id: Option<&'a str>) -> Self {
        match card_id {
            Some(id) => Endpoint::CardAnalytics(id),
            None => Endpoint::AnalyticsOverview,
        }
    }

    fn segments(&self) -> Vec<&'a str> {
        match *self {
            Endpoint::Cards => vec!["cards"],
            Endpoint::CardRegister => vec!["card-register"],
            Endpoint::CardAccess => vec!["card-access"],
            Endpoint::Card(id) => vec!["card", id],
            Endpoint::CardTransactions(id, _) => vec!["card", id, "transactions"],
            Endpoint::CardAnalytics(id) => vec!["card", id, "analytics"],
            Endpoint::AnalyticsOverview => vec!["analytics", "overview"],
        }
    }

    /// Full request URL under `base`. Card ids become single
    /// percent-encoded path segments.
    pub fn url(&self, base: &Url) -> Result<Url, GatewayError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(format!("{base}: cannot carry a path")))?
            .pop_if_empty()
            .extend(BASE_PATH)
            .extend(self.segments());

        if let Endpoint::CardTransactions(_, query) = self {
            url.query_pairs_mut()
                .append_pair("page", &query.page.to_string())
                .append_pair("limit", &query.limit.to_string());
        }

        Ok(url)
    }
}
