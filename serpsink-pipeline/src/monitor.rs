//! First-error capture. One multi-way wait over the error channel, the
//! shared cancellation token, and the run deadline; exactly one outcome is
//! recorded per run.

use crate::PipelineError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Resolves to the first fatal error, or `None` for a clean finish,
/// explicit cancellation, or deadline expiry (the deadline itself is not an
/// error; partial output stays valid). Capturing an error cancels the token
/// so both workers stop promptly; later errors are dropped with the channel.
pub(crate) async fn watch_errors(
    mut errors: mpsc::Receiver<PipelineError>,
    cancel: CancellationToken,
    deadline: tokio::time::Instant,
) -> Option<PipelineError> {
    tokio::select! {
        maybe_err = errors.recv() => match maybe_err {
            Some(err) => {
                tracing::warn!(error = %err, "pipeline.first_error");
                cancel.cancel();
                Some(err)
            }
            // Both workers dropped their senders without reporting.
            None => None,
        },
        _ = cancel.cancelled() => None,
        _ = tokio::time::sleep_until(deadline) => {
            tracing::warn!("pipeline.deadline_elapsed");
            cancel.cancel();
            None
        }
    }
}
