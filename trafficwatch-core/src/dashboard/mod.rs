//! Terminal output for the monitor.
//!
//! The dashboard never talks to the aggregator directly: it polls the
//! [`StatsHandle`](crate::aggregate::StatsHandle) snapshot and drains the alert channel,
//! once per refresh tick. JSON mode also subscribes to closed frames so none is
//! skipped between ticks.

mod alert_log;
mod render;
mod run;

#[cfg(test)]
mod tests;

pub use alert_log::{AlertLog, MAX_ALERTS};
pub use render::{redraw, render_stats};
pub use run::{HIDE_CURSOR, SHOW_CURSOR, run_dashboard};
