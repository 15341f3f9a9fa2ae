//! HTTP transport for the content delivery API.

use super::entry::EntryCollection;
use super::query::EntryQuery;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

/// Anything that can answer an [`EntryQuery`] with a collection.
///
/// The delivery client is the production implementation; tests and
/// alternative backends implement it directly.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Run one query. Errors are returned unmodified; no retry is attempted.
    async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection>;
}

/// `reqwest` client bound to one [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl DeliveryClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (proxy, custom timeouts, ...).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl EntrySource for DeliveryClient {
    async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
        let url = query.apply_to(&self.config.entries_url());
        debug!(
            host = self.config.host(),
            preview = self.config.is_preview(),
            limit = query.limit,
            skip = ?query.skip,
            "querying entries"
        );

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.config.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let collection: EntryCollection =
            serde_json::from_str(&body).map_err(|e| Error::decode(e.to_string()))?;
        debug!(
            total = collection.total,
            returned = collection.items.len(),
            "entries received"
        );
        Ok(collection)
    }
}

/// Error body: `{"sys": {"type": "Error", "id": "NotFound"}, "message": "...", "requestId": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    sys: ErrorSys,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorSys {
    id: String,
}

fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            status,
            code: parsed.sys.id,
            message: parsed.message.unwrap_or_default(),
            request_id: parsed.request_id,
        },
        Err(_) => Error::Api {
            status,
            code: "Unknown".to_string(),
            message: body.chars().take(200).collect(),
            request_id: None,
        },
    }
}
