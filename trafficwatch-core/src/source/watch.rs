use crate::event::LogEvent;
use crate::source::{FileFollower, SourceError};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Producer loop for one file.
///
/// Runs until `token` is cancelled or the event channel closes. A read error ends
/// the producer and is returned; the rest of the pipeline keeps running.
pub async fn watch_file(
    mut follower: FileFollower,
    events: UnboundedSender<LogEvent>,
    token: CancellationToken,
) -> Result<(), SourceError> {
    let path = follower.path().display().to_string();
    tracing::info!(path = %path, position = follower.position(), "watching log file");

    let mut sent = 0u64;
    let mut dropped = 0u64;

    loop {
        let line = tokio::select! {
            biased;

            _ = token.cancelled() => break,

            line = follower.next_line() => match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "log file producer failed");
                    return Err(e);
                }
            },
        };

        // Idle timeout; go around to observe cancellation.
        let Some(line) = line else {
            continue;
        };

        let Some(event) = LogEvent::from_line(&line) else {
            dropped += 1;
            tracing::trace!(path = %path, line = %line, "dropping unparsable line");
            continue;
        };

        if events.send(event).is_err() {
            tracing::debug!(path = %path, "event channel closed");
            break;
        }
        sent += 1;
    }

    tracing::info!(path = %path, sent, dropped, "stopped watching log file");
    Ok(())
}
