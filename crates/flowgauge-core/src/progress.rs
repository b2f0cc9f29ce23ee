//! Progress snapshots delivered to consumers.
//!
//! A [`Progress`] is an immutable, point-in-time view of a tracker. Derived
//! values are `None` while they are unknown: percent and remaining time need
//! a known total, speeds need a filled speed window.

use serde::Serialize;
use std::fmt;
use std::time::{Duration, SystemTime};

use crate::units::{format_duration, Unit};

/// Snapshot of an instrumented transfer.
#[derive(Debug, Clone, Serialize)]
pub struct Progress<D = ()> {
    /// Tracker name (free-form label).
    pub name: String,
    /// Work processed so far (bytes transferred, metres covered, ...).
    pub processed: u64,
    /// Total work, `None` when unknown.
    pub total: Option<u64>,
    /// Percent done, truncated to hundredths. Only with a positive total.
    pub percent: Option<f64>,
    /// Units per second over the speed window.
    pub speed: Option<u64>,
    /// Units per second since the start.
    pub speed_avg: Option<u64>,
    /// Unit standard used to render amounts.
    pub unit: Unit,
    /// Estimated time remaining. Only with a positive total and average speed.
    pub remaining: Option<Duration>,
    /// `remaining` in whole seconds.
    pub remaining_secs: Option<u64>,
    /// Time since the start when the snapshot was taken.
    pub elapsed: Duration,
    /// Wall-clock start of the transfer.
    pub start_time: Option<SystemTime>,
    /// Wall-clock estimate of completion.
    pub est_stop_time: Option<SystemTime>,
    /// Wall-clock time the transfer was stopped (terminal snapshot only).
    pub stop_time: Option<SystemTime>,
    /// Set on the terminal snapshot, after which the channel closes.
    pub finished: bool,
    /// Set when the total was reached or the tracker was stopped.
    pub completed: bool,
    /// Caller payload passed with the update that produced this snapshot.
    pub data: Option<D>,
}

impl<D> Progress<D> {
    /// Empty snapshot: nothing processed, nothing known.
    pub fn new(unit: Unit) -> Self {
        Self {
            name: String::new(),
            processed: 0,
            total: None,
            percent: None,
            speed: None,
            speed_avg: None,
            unit,
            remaining: None,
            remaining_secs: None,
            elapsed: Duration::ZERO,
            start_time: None,
            est_stop_time: None,
            stop_time: None,
            finished: false,
            completed: false,
            data: None,
        }
    }

    /// Fraction complete in [0.0, 1.0], `None` when the total is unknown or zero.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total.filter(|t| *t > 0)?;
        Some((self.processed as f64 / total as f64).min(1.0))
    }

    /// Same snapshot without the caller payload.
    pub(crate) fn without_data(&self) -> Progress<D> {
        Progress {
            name: self.name.clone(),
            processed: self.processed,
            total: self.total,
            percent: self.percent,
            speed: self.speed,
            speed_avg: self.speed_avg,
            unit: self.unit,
            remaining: self.remaining,
            remaining_secs: self.remaining_secs,
            elapsed: self.elapsed,
            start_time: self.start_time,
            est_stop_time: self.est_stop_time,
            stop_time: self.stop_time,
            finished: self.finished,
            completed: self.completed,
            data: None,
        }
    }

    fn speed_clause(&self) -> String {
        let speed = self.speed.filter(|s| *s > 0);
        let avg = self.speed_avg.filter(|s| *s > 0);
        let render = |v: u64| self.unit.format(v, true);
        match (speed, avg) {
            (Some(s), Some(a)) => format!(" (Speed: {}/s / AVG: {}/s)", render(s), render(a)),
            (Some(s), None) => format!(" (Speed: {}/s)", render(s)),
            (None, Some(a)) => format!(" (Speed AVG: {}/s)", render(a)),
            (None, None) => String::new(),
        }
    }
}

/// Renders only what is known: without a positive total there is no percent
/// and no remaining time.
impl<D> fmt::Display for Progress<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let processed = self.unit.format(self.processed, true);
        let speed = self.speed_clause();
        let elapsed = format_duration(self.elapsed);
        let Some(total) = self.total.filter(|t| *t > 0) else {
            return write!(f, "{processed}{speed} (Time: {elapsed})");
        };
        write!(
            f,
            "[{:.2}%] ({}/{}){} (Time: {}",
            self.percent.unwrap_or(0.0),
            processed,
            self.unit.format(total, true),
            speed,
            elapsed
        )?;
        if let Some(remaining) = self.remaining {
            write!(f, " / Remaining: {}", format_duration(remaining))?;
        }
        f.write_str(")")
    }
}
