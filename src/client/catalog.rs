//! Catalog endpoints: by level, by path, and phrase search.

use tracing::{debug, warn};

use super::CatalogClient;
use super::error::Error;
use super::types::{Catalog, CatalogQueryResult};

/// Levels searched by [`CatalogClient::find_phrase_in_subject`] when the
/// caller does not name any.
pub const DEFAULT_PHRASE_LEVELS: [u8; 4] = [2, 3, 4, 5];

/// Comma-joined form of a path, as sent in the `id` parameter.
pub fn path_id(path: &[u32]) -> String {
    path.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl CatalogClient {
    /// Fetch one page of subjects at `level` (1..=5).
    ///
    /// `subject` is the parent subject and is required by the API for
    /// levels above 1. It is not checked locally; the server answers an
    /// invalid combination with [`Error::PathNotFound`].
    pub async fn fetch_level(
        &self,
        level: u8,
        subject: Option<u32>,
    ) -> Result<CatalogQueryResult, Error> {
        let mut params = self.config.base_params();
        params.push(("id".into(), level.to_string()));
        if let Some(subject) = subject {
            params.push(("subject".into(), subject.to_string()));
        }
        self.get_catalog("/series/catalog/level", &params).await
    }

    /// Fetch one page of subjects under `path`, most general id first
    /// (e.g. `[2, 1, 1]`).
    pub async fn fetch_path(&self, path: &[u32]) -> Result<CatalogQueryResult, Error> {
        let mut params = self.config.base_params();
        params.push(("id".into(), path_id(path)));
        self.get_catalog("/series/catalog/path", &params).await
    }

    /// Subjects at `level`, optionally including every remaining page.
    pub async fn query_by_level(
        &self,
        level: u8,
        subject: Option<u32>,
        scrape_all_pages: bool,
    ) -> Result<Vec<Catalog>, Error> {
        let first = self.fetch_level(level, subject).await?;
        self.merge_pages(first, scrape_all_pages).await
    }

    /// Subjects under `path`, optionally including every remaining page.
    pub async fn query_by_path(
        &self,
        path: &[u32],
        scrape_all_pages: bool,
    ) -> Result<Vec<Catalog>, Error> {
        let first = self.fetch_path(path).await?;
        self.merge_pages(first, scrape_all_pages).await
    }

    /// Subjects below `subject` whose name or path description contains
    /// `phrase`, ignoring case.
    ///
    /// Each level in `levels` (default [`DEFAULT_PHRASE_LEVELS`]) is fetched
    /// with all of its pages. A level the server has no catalog for is
    /// skipped rather than failing the search.
    pub async fn find_phrase_in_subject(
        &self,
        phrase: &str,
        subject: u32,
        levels: Option<&[u8]>,
    ) -> Result<Vec<Catalog>, Error> {
        let levels = levels.unwrap_or(&DEFAULT_PHRASE_LEVELS[..]);
        let mut found = Vec::new();
        for &level in levels {
            let catalogs = match self.query_by_level(level, Some(subject), true).await {
                Ok(catalogs) => catalogs,
                Err(Error::PathNotFound) => {
                    warn!(level, subject, "no catalog for subject at level, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let before = found.len();
            found.extend(catalogs.into_iter().filter(|c| c.matches_phrase(phrase)));
            debug!(level, matches = found.len() - before, "searched level");
        }
        Ok(found)
    }

    async fn merge_pages(
        &self,
        first: CatalogQueryResult,
        scrape_all_pages: bool,
    ) -> Result<Vec<Catalog>, Error> {
        if !scrape_all_pages {
            return Ok(first.catalogs);
        }
        let mut pages = self.fetch_other_pages(&first.paging).await?;
        pages.insert(first.paging.current_page, first.catalogs);
        Ok(pages.into_values().flatten().collect())
    }
}
