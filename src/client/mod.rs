//! Async client for the CBS series catalog API.
//!
//! Built on reqwest. Configuration is fixed when the client is created;
//! the only runtime control is the cancellation token, which aborts
//! in-flight requests and page fan-out.

pub mod error;
pub mod query;
pub mod types;
pub(crate) mod wire;

mod catalog;
mod pages;


use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use catalog::{DEFAULT_PHRASE_LEVELS, path_id};
pub use error::Error;
pub use query::{
    CatalogConfig, CatalogConfigBuilder, DEFAULT_CONCURRENCY, Format, Lang, MAX_PAGE_SIZE,
};
pub use types::*;

use wire::{NOT_FOUND_BODY, parse_catalog_page};

/// Production API root.
pub const CBS_API_URL: &str = "https://apis.cbs.gov.il";

/// User agent sent when the caller has no preference.
pub const DEFAULT_USER_AGENT: &str = concat!("cbs-catalog/", env!("CARGO_PKG_VERSION"));

// ── Client ──────────────────────────────────────────────────────────────────

/// Async client for the CBS catalog endpoints.
///
/// Cheap to share behind an `Arc`; every query takes `&self`.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    config: CatalogConfig,
    cancel: CancellationToken,
}

impl CatalogClient {
    /// Create a new client against the production API.
    pub fn new(user_agent: &str, config: CatalogConfig) -> Result<Self, Error> {
        Self::with_base_url(user_agent, config, CBS_API_URL)
    }

    /// Create a new client with a custom base URL (for testing).
    pub fn with_base_url(
        user_agent: &str,
        config: CatalogConfig,
        base_url: &str,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            cancel: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token that cancels every current and future query on this client.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // ── HTTP helpers ────────────────────────────────────────────────────

    /// Fail early for formats this client cannot parse.
    pub(crate) fn ensure_json(&self) -> Result<(), Error> {
        match self.config.format {
            Format::Json => Ok(()),
            other => Err(Error::UnsupportedFormat(other)),
        }
    }

    /// GET a catalog endpoint with query parameters and parse the page.
    pub(crate) async fn get_catalog(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<CatalogQueryResult, Error> {
        self.ensure_json()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET catalog");
        let request = self.http.get(&url).query(query);
        with_cancel(&self.cancel, send_catalog(request)).await
    }
}

/// Send a prepared request and parse the response as one catalog page.
pub(crate) async fn send_catalog(
    request: reqwest::RequestBuilder,
) -> Result<CatalogQueryResult, Error> {
    let resp = request.send().await?;
    read_catalog(resp).await
}

/// Map the response status and body to a catalog page or a typed error.
///
/// The not-found envelope wins over the status code so that an invalid
/// path is reported the same way whatever status the server picks.
pub(crate) async fn read_catalog(resp: reqwest::Response) -> Result<CatalogQueryResult, Error> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() && body.trim() != NOT_FOUND_BODY {
        return Err(Error::Status {
            status: status.as_u16(),
            message: body,
        });
    }
    parse_catalog_page(&body)
}

/// Race `fut` against the cancellation token.
pub(crate) async fn with_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}
