//! Producer half of the pipeline: walks page indices, applies the
//! termination heuristics, and emits non-empty pages onto the bounded
//! channel. All run state (page index, empty-run counter) is local here.

use crate::PipelineError;
use serpsink_search::{PageSource, SearchPage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Consecutive item-less pages tolerated before giving up on the query.
const MAX_CONSECUTIVE_EMPTY: usize = 3;

/// Result offset stride per page index.
const RESULTS_PER_PAGE: u32 = 10;

/// Returns the number of pages emitted. The page sender is dropped on every
/// exit path; that close is the single "producer finished" signal the writer
/// waits on. Cancellation is not an error and reports nothing.
pub(crate) async fn fetch_pages(
    source: Arc<dyn PageSource>,
    query: String,
    page_limit: usize,
    page_delay: Duration,
    pages: mpsc::Sender<SearchPage>,
    errors: mpsc::Sender<PipelineError>,
    cancel: CancellationToken,
) -> usize {
    let mut emitted = 0usize;
    let mut consecutive_empty = 0usize;
    tracing::info!(query = %query, page_limit, "fetch.start");

    for page_idx in 0..page_limit {
        if cancel.is_cancelled() {
            tracing::debug!(page = page_idx, "fetch.cancelled");
            return emitted;
        }

        let offset = (page_idx > 0).then(|| page_idx as u32 * RESULTS_PER_PAGE);
        let page = match source.page(&query, offset).await {
            Ok(page) => page,
            Err(e) => {
                let _ = errors
                    .send(PipelineError::RemoteCall {
                        page: page_idx,
                        source: e,
                    })
                    .await;
                return emitted;
            }
        };

        let has_next = page.has_next();

        if page.item_count() == 0 {
            consecutive_empty += 1;
            tracing::debug!(page = page_idx, consecutive_empty, "fetch.empty_page");
            if consecutive_empty >= MAX_CONSECUTIVE_EMPTY {
                let _ = errors
                    .send(PipelineError::StalledResults {
                        limit: MAX_CONSECUTIVE_EMPTY,
                    })
                    .await;
                return emitted;
            }
        } else {
            consecutive_empty = 0;
            // Suspension point: the channel is bounded and this blocks until
            // the writer drains a slot (or the run is cancelled).
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(page = page_idx, "fetch.cancelled");
                    return emitted;
                }
                sent = pages.send(page) => {
                    if sent.is_err() {
                        tracing::debug!(page = page_idx, "fetch.writer_gone");
                        return emitted;
                    }
                }
            }
            emitted += 1;
        }

        if !has_next {
            tracing::info!(pages = emitted, "fetch.no_next_page");
            return emitted;
        }

        // Spacing between requests; also an interruption point so a cancel
        // never waits longer than one delay.
        tokio::select! {
            _ = cancel.cancelled() => return emitted,
            _ = tokio::time::sleep(page_delay) => {}
        }
    }

    tracing::info!(pages = emitted, page_limit, "fetch.page_limit_reached");
    emitted
}
