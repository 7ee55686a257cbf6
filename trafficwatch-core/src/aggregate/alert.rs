use chrono::{DateTime, Local};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current alert flag plus the message of its last transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertState {
    pub on: bool,
    pub message: Option<String>,
    pub changed_at: Option<DateTime<Local>>,
}

/// One edge of the alert flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub on: bool,
    pub message: String,
    pub lps_scene: f64,
    pub lps_lifetime: f64,
    pub at: DateTime<Local>,
}

/// Two-state alert machine.
///
/// Raises when the scene rate exceeds the lifetime rate by more than `threshold`
/// lines per second, and clears as soon as that comparison fails. The same comparison
/// is used in both directions, so a rate sitting right at the boundary can flap.
#[derive(Debug, Clone)]
pub struct AlertMonitor {
    threshold: u64,
    state: AlertState,
}

impl AlertMonitor {
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            state: AlertState::default(),
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn is_on(&self) -> bool {
        self.state.on
    }

    /// Feed one frame's rates; returns an event only when the flag flips.
    pub fn evaluate(
        &mut self,
        lps_scene: f64,
        lps_lifetime: f64,
        now: DateTime<Local>,
    ) -> Option<AlertEvent> {
        let breached = lps_scene > lps_lifetime + self.threshold as f64;
        if breached == self.state.on {
            return None;
        }

        let stamp = now.format(TIME_FORMAT);
        let message = if breached {
            format!("High traffic generated an alert - hits = {lps_scene:.2}/s, triggered at {stamp}")
        } else {
            format!("Traffic back to normal - hits = {lps_scene:.2}/s, recovered at {stamp}")
        };

        self.state = AlertState {
            on: breached,
            message: Some(message.clone()),
            changed_at: Some(now),
        };

        Some(AlertEvent {
            on: breached,
            message,
            lps_scene,
            lps_lifetime,
            at: now,
        })
    }
}
