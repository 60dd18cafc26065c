use serpsink_search::SearchError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline failures. The first one reported becomes the run's result;
/// non-fatal conditions (a page missing its item list, a malformed item) are
/// logged or skipped and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetching page {page} failed: {source}")]
    RemoteCall {
        page: usize,
        #[source]
        source: SearchError,
    },

    #[error("no results in {limit} consecutive pages; stopping")]
    StalledResults { limit: usize },

    #[error("failed to open output file {}: {source}", .path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write records: {0}")]
    SinkIo(#[from] csv::Error),
}
