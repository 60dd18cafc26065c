mod client;
mod types;

pub use client::SerpApi;
pub use types::{SearchPage, SearchRecord, SerpPagination};
