//! The fetch/write pipeline: streams paginated search results into a CSV
//! sink under a single deadline.
//!
//! Three tasks cooperate per run. The fetcher walks page indices on a
//! [`PageSource`] and emits non-empty pages onto a bounded channel; the
//! writer drains that channel and appends extracted records to the sink,
//! flushing after every page; the monitor captures the first fatal error
//! from either side and cancels the shared token so both stop promptly.
//! [`run_query`] owns the channels, the token, and the shutdown sequence,
//! and returns the first captured error or a [`RunSummary`].
//!
//! Coordination is channels-only: no state is shared between tasks, and the
//! producer closing its channel is the one "fetch finished" signal the
//! writer observes. Cancellation (deadline, explicit, or error-triggered) is
//! hard: the writer stops without draining pages still buffered in the
//! channel, so in-flight unflushed records are lost while everything already
//! flushed stays on disk.

mod error;
mod fetcher;
mod monitor;
mod writer;

pub use error::PipelineError;

use serpsink_search::PageSource;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on pages fetched per run.
    pub page_limit: usize,
    /// Capacity of the page and error channels.
    pub channel_capacity: usize,
    /// Spacing between successive page requests.
    pub page_delay: Duration,
    /// Total budget for the run; expiry cancels both workers.
    pub deadline: Duration,
    /// How long shutdown waits for the monitor before proceeding without it.
    pub monitor_grace: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_limit: 100,
            channel_capacity: 3,
            page_delay: Duration::from_millis(200),
            deadline: Duration::from_secs(5 * 60),
            monitor_grace: Duration::from_millis(500),
        }
    }
}

/// What a finished run did; only produced when no fatal error was captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub pages: usize,
    pub records: u64,
}

/// Run one query to completion and return the first captured error, if any.
///
/// Shutdown sequence: wait for the fetcher and writer to finish, cancel the
/// token to wake a still-waiting monitor, then await the monitor under a
/// short timeout — shutdown never blocks on it indefinitely.
pub async fn run_query(
    source: Arc<dyn PageSource>,
    query: impl Into<String>,
    output: impl Into<PathBuf>,
    config: PipelineConfig,
) -> Result<RunSummary, PipelineError> {
    let query = query.into();
    let output = output.into();

    let cancel = CancellationToken::new();
    let deadline = tokio::time::Instant::now() + config.deadline;
    let (page_tx, page_rx) = mpsc::channel(config.channel_capacity);
    let (err_tx, err_rx) = mpsc::channel(config.channel_capacity);

    let fetch_task = tokio::spawn(fetcher::fetch_pages(
        source,
        query,
        config.page_limit,
        config.page_delay,
        page_tx,
        err_tx.clone(),
        cancel.clone(),
    ));
    // The writer takes the last error sender; once both workers are done the
    // error channel closes on its own.
    let write_task = tokio::spawn(writer::write_records(
        output,
        page_rx,
        err_tx,
        cancel.clone(),
    ));
    let mut monitor_task = tokio::spawn(monitor::watch_errors(err_rx, cancel.clone(), deadline));

    let pages = match fetch_task.await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "fetch task failed");
            0
        }
    };
    let records = match write_task.await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "write task failed");
            0
        }
    };

    // The page channel closed when the fetcher dropped its sender; cancel
    // explicitly so a monitor still waiting on the deadline wakes up.
    cancel.cancel();

    let first_error = match tokio::time::timeout(config.monitor_grace, &mut monitor_task).await {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "monitor task failed");
            None
        }
        Err(_) => {
            tracing::warn!("monitor did not stop in time; proceeding");
            monitor_task.abort();
            None
        }
    };

    match first_error {
        Some(err) => Err(err),
        None => {
            tracing::info!(pages, records, "pipeline.done");
            Ok(RunSummary { pages, records })
        }
    }
}
