//! Client for the Israeli Central Bureau of Statistics (CBS) series catalog.
//!
//! The catalog arranges statistical subjects in five nested levels. Use
//! [`CatalogClient`] to list subjects by level or by path, optionally
//! fetching every page of a paginated result concurrently.

pub mod client;
pub mod output;

pub use client::{
    Catalog, CatalogClient, CatalogConfig, CatalogQueryResult, Error, Format, Lang, Paging,
};
