//! Query configuration for catalog requests.

use std::fmt;
use std::time::Duration;

/// Response language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    He,
}

impl Lang {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Lang::En => "en",
            Lang::He => "he",
        }
    }
}

/// Response format requested from the API.
///
/// The API can also render XML, CSV and XLS, but only JSON is parsed by
/// this client. Queries made with any other format fail with
/// [`Error::UnsupportedFormat`](super::Error::UnsupportedFormat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Xml,
    Csv,
    Xls,
}

impl Format {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Csv => "csv",
            Format::Xls => "xls",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default number of concurrent page requests during fan-out.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Largest page size the API accepts. Not enforced locally.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Settings shared by every request a [`CatalogClient`](super::CatalogClient)
/// makes. Fixed once the client is constructed.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub(crate) lang: Lang,
    pub(crate) format: Format,
    pub(crate) download: bool,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) concurrency: usize,
    pub(crate) timeout: Option<Duration>,
    pub(crate) connect_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            lang: Lang::En,
            format: Format::Json,
            download: false,
            page: 1,
            page_size: 100,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl CatalogConfig {
    /// Create a new config builder starting from the defaults.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder {
            config: CatalogConfig::default(),
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages fetched at once when gathering remaining pages.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Parameters sent with every catalog request.
    pub(crate) fn base_params(&self) -> Vec<(String, String)> {
        vec![
            ("lang".into(), self.lang.as_str().into()),
            ("format".into(), self.format.as_str().into()),
            ("download".into(), self.download.to_string()),
            ("page".into(), self.page.to_string()),
            ("pagesize".into(), self.page_size.to_string()),
        ]
    }
}

/// Builder for [`CatalogConfig`].
pub struct CatalogConfigBuilder {
    config: CatalogConfig,
}

impl CatalogConfigBuilder {
    pub fn lang(mut self, lang: Lang) -> Self {
        self.config.lang = lang;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Ask the server to serve the response as a file download.
    pub fn download(mut self, download: bool) -> Self {
        self.config.download = download;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.config.page = page;
        self
    }

    /// Items per page. The API caps this at [`MAX_PAGE_SIZE`].
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Concurrent page requests during fan-out. Zero is treated as one.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency.max(1);
        self
    }

    /// Overall per-request timeout. `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> CatalogConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn default_params() {
        let params = CatalogConfig::default().base_params();

        assert_eq!(param(&params, "lang"), Some("en"));
        assert_eq!(param(&params, "format"), Some("json"));
        assert_eq!(param(&params, "download"), Some("false"));
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "pagesize"), Some("100"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = CatalogConfig::builder()
            .lang(Lang::He)
            .download(true)
            .page(3)
            .page_size(MAX_PAGE_SIZE)
            .build();
        let params = config.base_params();

        assert_eq!(param(&params, "lang"), Some("he"));
        assert_eq!(param(&params, "download"), Some("true"));
        assert_eq!(param(&params, "page"), Some("3"));
        assert_eq!(param(&params, "pagesize"), Some("1000"));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let config = CatalogConfig::builder().concurrency(0).build();
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn format_wire_names() {
        assert_eq!(Format::Json.to_string(), "json");
        assert_eq!(Format::Xls.to_string(), "xls");
        assert_eq!(Format::default(), Format::Json);
    }
}
