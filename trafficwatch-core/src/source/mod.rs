//! Log file producers.
//!
//! Each watched file gets one [`watch_file`] task: it follows the file from its current
//! end (like `tail -f`), parses every complete line and pushes the resulting
//! [`LogEvent`](crate::event::LogEvent)s into the event channel. Unparsable lines are
//! dropped.

mod error;
mod follow;
mod watch;

#[cfg(test)]
mod tests;

pub use error::SourceError;
pub use follow::{FileFollower, POLL_INTERVAL};
pub use watch::watch_file;
