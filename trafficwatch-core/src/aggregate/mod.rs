//! Traffic aggregation and alerting
//!
//! Events arrive one at a time from the event channel and are counted into the
//! current *frame* (default 10s). When a frame closes, three rates are derived:
//!
//! - **frame**: hits of the frame just closed / frame interval
//! - **scene**: hits held by the sliding window / scene interval (default 120s); before
//!   one full scene has elapsed this mirrors the lifetime rate
//! - **lifetime**: all hits / time since start (never less than one second)
//!
//! The alert fires when the scene rate exceeds the lifetime rate by more than the
//! configured threshold and clears when it no longer does.
//!
//! The overall data flow is:
//!
//! LogEvent
//! Aggregator (FrameCounters, SlidingWindow, AlertMonitor)
//! AggregatedStats -> StatsHandle
//! AlertEvent -> alert channel
//!

mod aggregator;
mod alert;
mod heat_map;
mod run;
mod snapshot;
mod window;

#[cfg(test)]
mod tests;

pub use aggregator::{Aggregator, FrameCounters, FrameReport};
pub use alert::{AlertEvent, AlertMonitor, AlertState};
pub use heat_map::HeatMap;
pub use run::run_aggregator;
pub use snapshot::{AggregatedStats, StatsHandle};
pub use window::SlidingWindow;
