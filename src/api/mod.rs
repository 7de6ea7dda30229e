// SPDX-License-Identifier: MPL-2.0
//! Client for the DICE events API.
//!
//! One endpoint matters to us: `GET /events`, paginated and optionally
//! filtered by venue. The response envelope is `{data: [...], links: {next}}`;
//! both halves are optional and absence is never an error. Requests always
//! carry a `filter[date_from]` of "now" so the server filters out past events.

use crate::config::{self, Config};
use crate::domain::Event;
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

pub const API_BASE_URL: &str = "https://events-api.dice.fm/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// One page worth of fetch parameters. Owned so it can move into async tasks.
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Venue filter; empty means unfiltered.
    pub venue: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

/// Normalized fetch result: the page's events plus whether another page
/// exists.
#[derive(Debug, Clone)]
pub struct EventsPage {
    pub events: Vec<Event>,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<Event>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl EventsClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            api_key,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Builds a client from the resolved configuration. Fails with a
    /// configuration error when no API key is available — callers get this
    /// before any network I/O happens.
    pub fn from_config(http: reqwest::Client, config: &Config) -> Result<Self> {
        let api_key = config::resolve_api_key(config).ok_or_else(|| {
            Error::Config(
                "API key not found. Set DICE_API_KEY or add api_key to settings.toml.".to_string(),
            )
        })?;
        Ok(Self::new(http, api_key))
    }

    /// Points the client at a different API root (integration tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch_events(&self, query: &EventQuery) -> Result<EventsPage> {
        let params = build_query(query, Utc::now());

        let response = self
            .http
            .get(format!("{}/events", self.base_url))
            .header("x-api-key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("invalid response body: {e}")))?;

        Ok(EventsPage {
            events: envelope.data,
            has_more: envelope.links.next.is_some(),
        })
    }
}

/// Query-parameter assembly, split out so tests can pin the wire format
/// without a server.
fn build_query(query: &EventQuery, now: DateTime<Utc>) -> Vec<(String, String)> {
    let mut params = vec![
        ("page[size]".to_string(), query.page_size.to_string()),
        ("page[number]".to_string(), query.page.to_string()),
        (
            "filter[date_from]".to_string(),
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ];

    if !query.venue.is_empty() {
        params.push(("filter[venues]".to_string(), query.venue.clone()));
    }

    params
}
