use crate::aggregate::alert::{AlertEvent, AlertMonitor};
use crate::aggregate::heat_map::HeatMap;
use crate::aggregate::snapshot::AggregatedStats;
use crate::aggregate::window::SlidingWindow;
use crate::conf::MonitorConfig;
use crate::event::LogEvent;
use chrono::{DateTime, Local, TimeDelta};
use std::mem;
use std::time::{Duration, Instant};

/// Lifetime rates never divide by less than this.
const MIN_ELAPSED: Duration = Duration::from_secs(1);

/// Counters for the frame currently being filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameCounters {
    pub hits: u64,
    pub sections: HeatMap,
    pub host_bytes: HeatMap,
}

impl FrameCounters {
    pub fn record(&mut self, event: &LogEvent) {
        self.hits += 1;
        self.sections.add(&event.section, 1);
        self.host_bytes.add(&event.remote_host, event.size);
    }
}

/// Outcome of closing one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub stats: AggregatedStats,
    pub alert: Option<AlertEvent>,
}

/// Frame/scene/lifetime rate engine.
///
/// Pure state: time only enters through the `Instant`s handed to
/// [`Aggregator::close_frame`], so the async loop in `run.rs` owns the clock.
#[derive(Debug)]
pub struct Aggregator {
    frame_interval: Duration,
    scene_interval: Duration,

    start: Instant,
    start_time: DateTime<Local>,
    next_deadline: Instant,

    frame: FrameCounters,
    window: SlidingWindow,
    lifetime_hits: u64,
    frames_closed: u64,
    total_sections: HeatMap,
    total_host_bytes: HeatMap,

    alert: AlertMonitor,
}

impl Aggregator {
    /// `cfg` must already be validated.
    pub fn new(cfg: &MonitorConfig, start: Instant) -> Self {
        Self {
            frame_interval: cfg.frame_interval,
            scene_interval: cfg.scene_interval,
            start,
            start_time: Local::now(),
            next_deadline: start + cfg.frame_interval,
            frame: FrameCounters::default(),
            window: SlidingWindow::new(cfg.scene_slots()),
            lifetime_hits: 0,
            frames_closed: 0,
            total_sections: HeatMap::new(),
            total_host_bytes: HeatMap::new(),
            alert: AlertMonitor::new(cfg.alert_threshold),
        }
    }

    pub fn ingest(&mut self, event: &LogEvent) {
        self.frame.record(event);
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn lifetime_hits(&self) -> u64 {
        self.lifetime_hits
    }

    pub fn frames_closed(&self) -> u64 {
        self.frames_closed
    }

    #[cfg(test)]
    pub(crate) fn current_frame(&self) -> &FrameCounters {
        &self.frame
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> &SlidingWindow {
        &self.window
    }

    #[cfg(test)]
    pub(crate) fn alert_on(&self) -> bool {
        self.alert.is_on()
    }

    /// Close the current frame as of `now`.
    ///
    /// The next deadline moves by exactly one frame interval, so deadlines stay on the
    /// `start + k * frame_interval` grid no matter how late this runs.
    pub fn close_frame(&mut self, now: Instant) -> FrameReport {
        let frame = mem::take(&mut self.frame);

        let lps_frame = frame.hits as f64 / self.frame_interval.as_secs_f64();

        self.lifetime_hits += frame.hits;
        let elapsed = now.saturating_duration_since(self.start);
        let lps_lifetime = self.lifetime_hits as f64 / elapsed.max(MIN_ELAPSED).as_secs_f64();

        self.window.push(frame.hits);

        let warmed_up = elapsed >= self.scene_interval;
        let lps_scene = if warmed_up {
            self.window.sum() as f64 / self.scene_interval.as_secs_f64()
        } else {
            lps_lifetime
        };

        let wall_now = self.start_time + TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero());
        let alert = self.alert.evaluate(lps_scene, lps_lifetime, wall_now);

        self.total_sections.merge(&frame.sections);
        self.total_host_bytes.merge(&frame.host_bytes);

        self.frames_closed += 1;
        self.next_deadline += self.frame_interval;

        tracing::debug!(
            frame = self.frames_closed,
            hits = frame.hits,
            lps_frame,
            lps_scene,
            lps_lifetime,
            warmed_up,
            "frame closed"
        );

        let stats = AggregatedStats {
            start_time: self.start_time,
            frames_closed: self.frames_closed,
            lifetime_hits: self.lifetime_hits,
            lps_frame,
            lps_scene,
            lps_lifetime,
            warmed_up,
            frame_sections: frame.sections,
            frame_host_bytes: frame.host_bytes,
            total_sections: self.total_sections.clone(),
            total_host_bytes: self.total_host_bytes.clone(),
            alert: self.alert.state().clone(),
        };

        FrameReport { stats, alert }
    }
}
