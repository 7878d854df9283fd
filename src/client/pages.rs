//! Concurrent fetching of the pages around the one already fetched.

use std::collections::BTreeMap;

use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

use super::error::Error;
use super::types::{Catalog, Paging};
use super::{CatalogClient, send_catalog, with_cancel};

impl CatalogClient {
    /// Fetch every page of the result set except `paging.current_page` and
    /// return their catalogs in page order.
    ///
    /// Up to [`CatalogConfig::concurrency`](super::CatalogConfig::concurrency)
    /// pages are in flight at once. The first failing page aborts the rest
    /// and its error is returned; there are no partial results.
    pub async fn gather_remaining_pages(&self, paging: &Paging) -> Result<Vec<Catalog>, Error> {
        let pages = self.fetch_other_pages(paging).await?;
        Ok(pages.into_values().flatten().collect())
    }

    /// Catalogs of every page other than the current one, keyed by page.
    pub(crate) async fn fetch_other_pages(
        &self,
        paging: &Paging,
    ) -> Result<BTreeMap<u32, Vec<Catalog>>, Error> {
        let mut pending = paging.remaining_pages().peekable();
        let mut pages: BTreeMap<u32, Vec<Catalog>> = BTreeMap::new();
        if pending.peek().is_none() {
            return Ok(pages);
        }
        self.ensure_json()?;

        // Tasks are spawned lazily so at most `concurrency` exist at once.
        // Dropping the JoinSet on an early return aborts the ones in flight.
        let mut tasks = JoinSet::new();
        loop {
            while tasks.len() < self.config.concurrency {
                let Some(page) = pending.next() else {
                    break;
                };
                let url = page_url(&paging.current_url, &self.base_url, page)?;
                let http = self.http.clone();
                let cancel = self.cancel.clone();
                tasks.spawn(async move {
                    debug!(page, %url, "fetching page");
                    let result = with_cancel(&cancel, send_catalog(http.get(url))).await;
                    (page, result)
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (page, result) = joined?;
            pages.insert(page, result?.catalogs);
        }

        info!(
            pages = pages.len(),
            current_page = paging.current_page,
            last_page = paging.last_page,
            "gathered remaining pages"
        );
        Ok(pages)
    }
}

/// Build the URL of `page` from the first page's `current_url`.
///
/// The `page` query parameter is replaced in place, or appended when
/// missing. Relative URLs are appended to `base_url`, keeping any path
/// prefix it carries.
pub(crate) fn page_url(current_url: &str, base_url: &str, page: u32) -> Result<Url, Error> {
    let invalid = |reason: String| Error::InvalidPageUrl {
        url: current_url.to_string(),
        reason,
    };

    let mut url = match Url::parse(current_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let relative = current_url.trim_start_matches('/');
            Url::parse(&format!("{base_url}/{relative}")).map_err(|e| invalid(e.to_string()))?
        }
        Err(e) => return Err(invalid(e.to_string())),
    };

    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case("page") {
                replaced = true;
                (k.into_owned(), page.to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    if !replaced {
        pairs.push(("page".into(), page.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://apis.cbs.gov.il";

    #[test]
    fn replaces_page_in_place() {
        let url = page_url(
            "https://apis.cbs.gov.il/series/catalog/level?id=2&page=1&pagesize=100",
            BASE,
            3,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://apis.cbs.gov.il/series/catalog/level?id=2&page=3&pagesize=100"
        );
    }

    #[test]
    fn appends_missing_page() {
        let url = page_url("https://apis.cbs.gov.il/series/catalog/path?id=2%2C1", BASE, 2).unwrap();
        assert_eq!(url.query(), Some("id=2%2C1&page=2"));
    }

    #[test]
    fn resolves_relative_url() {
        let url = page_url("/series/catalog/level?id=1&page=1", BASE, 4).unwrap();
        assert_eq!(
            url.as_str(),
            "https://apis.cbs.gov.il/series/catalog/level?id=1&page=4"
        );
    }

    #[test]
    fn relative_url_keeps_base_path_prefix() {
        let url = page_url(
            "/series/catalog/path?id=2%2C1&page=1",
            "http://localhost:8080/cbs",
            2,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/cbs/series/catalog/path?id=2%2C1&page=2"
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = page_url("http://[::1", BASE, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidPageUrl { .. }), "got: {err:?}");
    }
}
