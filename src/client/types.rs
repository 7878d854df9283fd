//! Public data types for the CBS catalog API.

use serde::{Deserialize, Serialize};

// ── Catalog ─────────────────────────────────────────────────────────────────

/// One subject in the five-level catalog hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Subject identifiers from the top level down to this entry.
    pub path: Vec<u32>,
    pub name: String,
    /// Human-readable ancestry, only present below the top levels.
    #[serde(rename = "pathDesc", default)]
    pub path_desc: Option<String>,
}

impl Catalog {
    /// Depth of this entry in the hierarchy (1..=5).
    pub fn level(&self) -> usize {
        self.path.len()
    }

    /// Case-insensitive match of `phrase` against `name` and `pathDesc`.
    pub fn matches_phrase(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.name.to_lowercase().contains(&phrase)
            || self
                .path_desc
                .as_deref()
                .is_some_and(|desc| desc.to_lowercase().contains(&phrase))
    }
}

// ── Paging ──────────────────────────────────────────────────────────────────

/// Position of one response page within the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub total_items: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub last_page: u32,
    /// URL that produced this page. Other pages are derived from it.
    pub current_url: String,
    #[serde(default)]
    pub first_url: Option<String>,
    #[serde(default)]
    pub previous_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub last_url: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Paging {
    /// Every page of the result set other than `current_page`, in order.
    pub fn remaining_pages(&self) -> impl Iterator<Item = u32> + use<> {
        let current = self.current_page;
        (1..=self.last_page).filter(move |&page| page != current)
    }
}

// ── Query result ────────────────────────────────────────────────────────────

/// The parsed content of a single catalog response page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQueryResult {
    pub catalogs: Vec<Catalog>,
    pub level: u8,
    pub paging: Paging,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging(current_page: u32, last_page: u32) -> Paging {
        Paging {
            total_items: u64::from(last_page) * 10,
            page_size: 10,
            current_page,
            last_page,
            current_url: format!(
                "https://apis.cbs.gov.il/series/catalog/level?page={current_page}"
            ),
            first_url: None,
            previous_url: None,
            next_url: None,
            last_url: None,
            base_url: None,
        }
    }

    #[test]
    fn remaining_pages_skip_current_page() {
        assert_eq!(paging(1, 3).remaining_pages().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(paging(3, 3).remaining_pages().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(paging(2, 4).remaining_pages().collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn single_page_has_nothing_remaining() {
        assert_eq!(paging(1, 1).remaining_pages().count(), 0);
        assert_eq!(paging(1, 0).remaining_pages().count(), 0);
    }
}
