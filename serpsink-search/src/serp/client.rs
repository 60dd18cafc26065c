//! Minimal client for the SerpAPI search endpoint.
//!
//! Handles auth and request parameter shaping before delegating to the
//! shared HTTP client. Retries are pinned to zero: the pipeline treats a
//! failed page request as fatal rather than retrying transparently.

use crate::serp::types::SearchPage;
use crate::source::PageSource;
use crate::SearchError;
use serpsink_http::{Auth, HttpClient, RequestOpts};
use std::borrow::Cow;
use std::time::Instant;

#[derive(Clone)]
pub struct SerpApi {
    http: HttpClient,
    api_key: String,
    engine: String,
}

impl SerpApi {
    pub fn new(api_key: String, engine: String) -> Self {
        let http = HttpClient::new("https://serpapi.com").expect("valid base");
        Self {
            http,
            api_key,
            engine,
        }
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }
}

#[async_trait::async_trait]
impl PageSource for SerpApi {
    async fn page(&self, query: &str, offset: Option<u32>) -> Result<SearchPage, SearchError> {
        let mut params: Vec<(&str, Cow<'_, str>)> = vec![
            ("engine", self.engine.as_str().into()),
            ("q", query.into()),
        ];
        if let Some(start) = offset {
            params.push(("start", start.to_string().into()));
        }

        let query_snippet: String = query.chars().take(160).collect();
        let started = Instant::now();
        tracing::info!(
            target: "search.serp",
            query = %query_snippet,
            engine = %self.engine,
            offset = ?offset,
            "serp.page.start"
        );

        let result: Result<SearchPage, _> = self
            .http
            .get_json(
                "search",
                RequestOpts {
                    auth: Some(Auth::Query {
                        name: "api_key",
                        value: Cow::Borrowed(&self.api_key),
                    }),
                    query: Some(params),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await;

        match result {
            Ok(page) => {
                tracing::info!(
                    target: "search.serp",
                    query = %query_snippet,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    item_count = page.item_count(),
                    has_next = page.has_next(),
                    "serp.page.success"
                );
                Ok(page)
            }
            Err(e) => {
                tracing::warn!(
                    target: "search.serp",
                    query = %query_snippet,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "serp.page.error"
                );
                Err(e.into())
            }
        }
    }
}
