//! Search provider integration: the SerpAPI client, the page/record data
//! model, and the dork query templates.
//!
//! The pipeline consumes providers through the [`PageSource`] trait so tests
//! can script page sequences without touching the network.

use thiserror::Error;

pub mod dorks;
mod serp;
mod source;

pub use serp::{SearchPage, SearchRecord, SerpApi, SerpPagination};
pub use source::PageSource;

/// Errors surfaced by a page source.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] serpsink_http::HttpError),
}
