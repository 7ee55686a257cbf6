use crate::aggregate::alert::AlertState;
use crate::aggregate::heat_map::HeatMap;
use arc_swap::ArcSwap;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Closed frames a slow subscriber may fall behind by before it starts losing them.
const FRAME_BACKLOG: usize = 64;

/// Statistics published at every frame close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub start_time: DateTime<Local>,
    pub frames_closed: u64,
    pub lifetime_hits: u64,

    pub lps_frame: f64,
    pub lps_scene: f64,
    pub lps_lifetime: f64,

    /// False while the window covers less than one scene; `lps_scene` then mirrors
    /// `lps_lifetime`.
    pub warmed_up: bool,

    pub frame_sections: HeatMap,
    pub frame_host_bytes: HeatMap,
    pub total_sections: HeatMap,
    pub total_host_bytes: HeatMap,

    pub alert: AlertState,
}

impl AggregatedStats {
    pub fn empty(start_time: DateTime<Local>) -> Self {
        Self {
            start_time,
            frames_closed: 0,
            lifetime_hits: 0,
            lps_frame: 0.0,
            lps_scene: 0.0,
            lps_lifetime: 0.0,
            warmed_up: false,
            frame_sections: HeatMap::new(),
            frame_host_bytes: HeatMap::new(),
            total_sections: HeatMap::new(),
            total_host_bytes: HeatMap::new(),
            alert: AlertState::default(),
        }
    }
}

/// Shared, lock-free view of the latest [`AggregatedStats`].
///
/// Single writer (the aggregator), any number of readers. Every publish replaces the
/// whole struct, so a reader never mixes fields from two frames. Readers that need
/// every frame rather than the latest one use [`StatsHandle::subscribe`].
#[derive(Debug, Clone)]
pub struct StatsHandle {
    inner: Arc<ArcSwap<AggregatedStats>>,
    frames: broadcast::Sender<Arc<AggregatedStats>>,
}

impl StatsHandle {
    pub fn new(initial: AggregatedStats) -> Self {
        let (frames, _) = broadcast::channel(FRAME_BACKLOG);
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
            frames,
        }
    }

    pub fn load(&self) -> Arc<AggregatedStats> {
        self.inner.load_full()
    }

    /// Every snapshot published from now on, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AggregatedStats>> {
        self.frames.subscribe()
    }

    pub(crate) fn publish(&self, stats: AggregatedStats) {
        let stats = Arc::new(stats);
        self.inner.store(Arc::clone(&stats));
        // No subscribers is normal outside JSON mode.
        let _ = self.frames.send(stats);
    }
}
