use crate::source::SourceError;
use std::io::SeekFrom;
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::time::Instant;

/// Sleep between checks for new data while the file is idle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// `tail -f` over a single file.
///
/// Starts at the end of the file as it was when opened. [`FileFollower::next_line`]
/// yields complete lines only; a partially written line is kept until its newline
/// shows up.
#[derive(Debug)]
pub struct FileFollower {
    path: PathBuf,
    reader: BufReader<File>,
    position: u64,
    pending: Vec<u8>,
    timeout: Duration,
}

impl FileFollower {
    /// Open `path` and seek to its current end.
    ///
    /// `timeout` bounds how long [`FileFollower::next_line`] waits for new data.
    pub async fn open(path: impl Into<PathBuf>, timeout: Duration) -> Result<Self, SourceError> {
        let path = path.into();

        let mut file = File::open(&path).await.map_err(|e| SourceError::Open {
            path: path.clone(),
            source: e,
        })?;

        let position = file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|e| SourceError::Open {
                path: path.clone(),
                source: e,
            })?;

        Ok(Self {
            path,
            reader: BufReader::new(file),
            position,
            pending: Vec::new(),
            timeout,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Next complete line without its line terminator.
    ///
    /// Returns `Ok(None)` when nothing new arrived within the timeout; calling again
    /// resumes where the previous call stopped. Invalid UTF-8 is replaced, not fatal.
    pub async fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            let n = self
                .reader
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(|e| self.read_error(e))?;
            self.position += n as u64;

            if self.pending.ends_with(b"\n") {
                let raw = mem::take(&mut self.pending);
                let line = String::from_utf8_lossy(&raw);
                return Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()));
            }

            if n == 0 {
                self.rewind_if_truncated().await?;

                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
            }
        }
    }

    /// Start over from offset 0 when the file shrank below our position (copytruncate
    /// style rotation).
    async fn rewind_if_truncated(&mut self) -> Result<(), SourceError> {
        let Ok(meta) = fs::metadata(&self.path).await else {
            // Unlinked files keep serving the open handle.
            return Ok(());
        };

        if meta.len() < self.position {
            tracing::warn!(
                path = %self.path.display(),
                len = meta.len(),
                position = self.position,
                "log file truncated; reading from start"
            );
            self.reader
                .seek(SeekFrom::Start(0))
                .await
                .map_err(|e| self.read_error(e))?;
            self.position = 0;
            self.pending.clear();
        }

        Ok(())
    }

    fn read_error(&self, source: std::io::Error) -> SourceError {
        SourceError::Read {
            path: self.path.clone(),
            source,
        }
    }
}
