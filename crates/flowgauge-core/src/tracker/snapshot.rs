//! Builds immutable [`Progress`] values from accumulator and window state.

use std::time::{Duration, Instant, SystemTime};

use super::window::{per_second, SpeedWindow};
use crate::progress::Progress;
use crate::units::Unit;

/// Monotonic and wall-clock reading of the moment work started.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Started {
    pub(crate) at: Instant,
    pub(crate) wall: SystemTime,
}

/// Accumulated work and the metadata carried into every snapshot.
#[derive(Debug)]
pub(crate) struct Accumulator {
    pub(crate) name: String,
    pub(crate) unit: Unit,
    pub(crate) processed: u64,
    pub(crate) total: Option<u64>,
    pub(crate) started: Option<Started>,
}

impl Accumulator {
    pub(crate) fn new(unit: Unit) -> Self {
        Self {
            name: String::new(),
            unit,
            processed: 0,
            total: None,
            started: None,
        }
    }

    /// A zero total counts as reached.
    pub(crate) fn reached_total(&self) -> bool {
        self.total.is_some_and(|t| self.processed >= t)
    }
}

/// Percent of `total`, truncated (not rounded) at the hundredths digit.
pub(crate) fn percent(processed: u64, total: u64) -> f64 {
    ((processed as f64 / total as f64) * 10_000.0).floor() / 100.0
}

/// Snapshot of `acc` as seen at `now` / `wall`.
pub(crate) fn build<D>(
    acc: &Accumulator,
    window: &SpeedWindow,
    now: Instant,
    wall: SystemTime,
) -> Progress<D> {
    let elapsed = acc
        .started
        .map(|s| now.saturating_duration_since(s.at))
        .unwrap_or_default();

    // Speeds stay unknown until the window has wrapped once.
    let (speed, speed_avg) = match window.oldest() {
        Some(_) => (
            window.speed(acc.processed, now),
            acc.started.and_then(|_| per_second(acc.processed, elapsed)),
        ),
        None => (None, None),
    };

    let sized = acc.total.filter(|t| *t > 0);
    let remaining = match (sized, speed_avg) {
        (Some(total), Some(avg)) if avg > 0 => Some(Duration::from_secs_f64(
            total.saturating_sub(acc.processed) as f64 / avg as f64,
        )),
        _ => None,
    };

    Progress {
        name: acc.name.clone(),
        processed: acc.processed,
        total: acc.total,
        percent: sized.map(|t| percent(acc.processed, t)),
        speed,
        speed_avg,
        unit: acc.unit,
        remaining,
        remaining_secs: remaining.map(|r| r.as_secs()),
        elapsed,
        start_time: acc.started.map(|s| s.wall),
        est_stop_time: remaining.and_then(|r| wall.checked_add(r)),
        stop_time: None,
        finished: false,
        completed: false,
        data: None,
    }
}
