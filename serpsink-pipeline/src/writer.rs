//! Consumer half of the pipeline: drains the page channel, extracts records,
//! and appends them to the CSV sink, flushing after every page so a crash
//! loses at most the in-flight page.
//!
//! The sink file handle is owned exclusively here; nothing else in the
//! pipeline opens or writes it.

use crate::PipelineError;
use serpsink_search::{SearchPage, SearchRecord};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Returns the number of records appended.
///
/// Cancellation policy is hard: once the token fires, the writer stops
/// immediately and pages still buffered in the channel are dropped. Already
/// flushed records stay on disk.
pub(crate) async fn write_records(
    path: PathBuf,
    mut pages: mpsc::Receiver<SearchPage>,
    errors: mpsc::Sender<PipelineError>,
    cancel: CancellationToken,
) -> u64 {
    let mut writer = match open_sink(&path) {
        Ok(writer) => writer,
        Err(e) => {
            let _ = errors.send(e).await;
            return 0;
        }
    };

    let mut written = 0u64;
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                tracing::debug!(records = written, "write.cancelled");
                return written;
            }
            maybe_page = pages.recv() => match maybe_page {
                Some(page) => match append_page(&mut writer, &page) {
                    Ok(appended) => written += appended,
                    Err(e) => {
                        let _ = errors.send(e).await;
                        return written;
                    }
                },
                // Producer finished and the buffer is drained.
                None => {
                    tracing::info!(records = written, "write.drained");
                    return written;
                }
            }
        }
    }
}

/// Open the sink in append/create mode; an empty file gets the header row
/// (flushed) before any data. Existing content is never rewritten.
fn open_sink(path: &Path) -> Result<csv::Writer<File>, PipelineError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PipelineError::SinkOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
    let needs_header = file
        .metadata()
        .map_err(|e| PipelineError::SinkOpen {
            path: path.to_path_buf(),
            source: e,
        })?
        .len()
        == 0;

    let mut writer = csv::Writer::from_writer(file);
    if needs_header {
        writer.write_record(SearchRecord::HEADER)?;
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(writer)
}

/// Append one page's records and flush. A page without a well-formed item
/// list is reported and skipped, not fatal; items that are not objects are
/// silently dropped.
fn append_page(
    writer: &mut csv::Writer<File>,
    page: &SearchPage,
) -> Result<u64, PipelineError> {
    let Some(items) = page.items() else {
        tracing::warn!("write.page_missing_item_list");
        return Ok(0);
    };

    let mut appended = 0u64;
    for item in items {
        let Some(record) = SearchRecord::from_item(item) else {
            continue;
        };
        writer.write_record(record.as_row())?;
        appended += 1;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_only_on_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = open_sink(&path).unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(rows(&path), vec![vec!["title", "link", "snippet", "date"]]);

        // Re-opening the populated sink must not add a second header.
        let writer = open_sink(&path).unwrap();
        drop(writer);
        assert_eq!(rows(&path).len(), 1);
    }

    #[test]
    fn page_without_item_list_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut writer = open_sink(&path).unwrap();

        let page: SearchPage =
            serde_json::from_value(json!({"search_metadata": {"status": "Success"}})).unwrap();
        let appended = append_page(&mut writer, &page).unwrap();
        assert_eq!(appended, 0);
    }

    #[test]
    fn malformed_items_are_dropped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut writer = open_sink(&path).unwrap();

        let page: SearchPage = serde_json::from_value(json!({
            "organic_results": [
                {"title": "ok", "link": "u"},
                "not an object",
                {"snippet": "only snippet"}
            ]
        }))
        .unwrap();
        let appended = append_page(&mut writer, &page).unwrap();
        drop(writer);

        assert_eq!(appended, 2);
        let rows = rows(&path);
        assert_eq!(rows[1], vec!["ok", "u", "", ""]);
        assert_eq!(rows[2], vec!["", "", "only snippet", ""]);
    }

    #[test]
    fn open_reports_unwritable_path() {
        let err = open_sink(Path::new("/no-such-dir/out.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::SinkOpen { .. }));
    }
}
