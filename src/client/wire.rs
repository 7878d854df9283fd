//! Internal wire types for serde deserialization.
//!
//! These types match the raw JSON envelope returned by the catalog
//! endpoints and are not exposed publicly.

use serde::Deserialize;

use super::error::Error;
use super::types::{Catalog, CatalogQueryResult, Paging};

/// Exact body the API returns for an unknown level/path/subject.
pub(crate) const NOT_FOUND_BODY: &str = r#"{"Message":"Error: Series Level Catalog"}"#;

#[derive(Deserialize)]
pub(crate) struct CatalogEnvelope {
    pub catalogs: CatalogsBody,
}

#[derive(Deserialize)]
pub(crate) struct CatalogsBody {
    pub level: u8,
    pub catalog: Vec<Catalog>,
    pub paging: Paging,
}

/// Parse a raw response body into a [`CatalogQueryResult`].
pub(crate) fn parse_catalog_page(body: &str) -> Result<CatalogQueryResult, Error> {
    if body.trim() == NOT_FOUND_BODY {
        return Err(Error::PathNotFound);
    }
    let envelope: CatalogEnvelope = serde_json::from_str(body)?;
    let CatalogsBody {
        level,
        catalog,
        paging,
    } = envelope.catalogs;
    Ok(CatalogQueryResult {
        catalogs: catalog,
        level,
        paging,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "catalogs": {
            "level": 2,
            "catalog": [
                {"path": [2, 1], "name": "Prices", "pathDesc": null},
                {"path": [2, 2], "name": "Consumer Price Index", "pathDesc": "Prices"}
            ],
            "paging": {
                "total_items": 2,
                "page_size": 100,
                "current_page": 1,
                "last_page": 1,
                "first_url": null,
                "previous_url": null,
                "current_url": "https://apis.cbs.gov.il/series/catalog/level?id=2&subject=2&page=1",
                "next_url": null,
                "last_url": "https://apis.cbs.gov.il/series/catalog/level?id=2&subject=2&page=1",
                "base_url": null
            }
        }
    }"#;

    #[test]
    fn parses_catalog_envelope() {
        let result = parse_catalog_page(PAGE_JSON).unwrap();

        assert_eq!(result.level, 2);
        assert_eq!(result.catalogs.len(), 2);
        assert_eq!(result.catalogs[0].path, vec![2, 1]);
        assert_eq!(result.catalogs[0].path_desc, None);
        assert_eq!(result.catalogs[1].path_desc.as_deref(), Some("Prices"));
        assert_eq!(result.paging.last_page, 1);
        assert_eq!(result.paging.next_url, None);
    }

    #[test]
    fn not_found_envelope_is_typed_error() {
        let err = parse_catalog_page(NOT_FOUND_BODY).unwrap_err();
        assert!(matches!(err, Error::PathNotFound), "got: {err:?}");
    }

    #[test]
    fn other_message_is_malformed() {
        let err = parse_catalog_page(r#"{"Message":"Something else"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)), "got: {err:?}");
    }

    #[test]
    fn wrong_types_are_malformed() {
        let body = r#"{"catalogs": {"level": "two", "catalog": [], "paging": {}}}"#;
        let err = parse_catalog_page(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)), "got: {err:?}");
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_catalog_page("<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)), "got: {err:?}");
    }
}
