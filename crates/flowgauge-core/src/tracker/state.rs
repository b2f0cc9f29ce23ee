//! Mutable tracker state and the throttle/delivery decision.
//!
//! Everything here runs under the tracker's mutex. `advance` is the only
//! entry point that can emit snapshots; it takes the current instant as an
//! argument so the decision logic is deterministic under test.

use std::time::{Duration, Instant, SystemTime};

use super::delivery::{Delivery, DeliveryMode, ProgressReceiver};
use super::snapshot::{self, Accumulator, Started};
use super::window::{SpeedWindow, DEFAULT_WINDOW_SIZE};
use crate::progress::Progress;
use crate::units::Unit;

/// Default minimum interval between two delivered snapshots.
pub const DEFAULT_UPDATE_FREQ: Duration = Duration::from_millis(100);
/// Default absolute granule (1 = every change is eligible).
pub const DEFAULT_UPDATE_GRANULE: u64 = 1;

/// Rate limits applied before a snapshot is offered.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Throttle {
    pub(crate) update_freq: Duration,
    pub(crate) granule: u64,
    pub(crate) granule_percent: u32,
    pub(crate) mode: DeliveryMode,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            update_freq: DEFAULT_UPDATE_FREQ,
            granule: DEFAULT_UPDATE_GRANULE,
            granule_percent: 0,
            mode: DeliveryMode::BestEffort,
        }
    }
}

#[derive(Debug)]
pub(crate) struct TrackerState<D> {
    pub(crate) acc: Accumulator,
    pub(crate) window: SpeedWindow,
    pub(crate) throttle: Throttle,
    last_sent: Option<Instant>,
    closed: bool,
    delivery: Delivery<D>,
}

impl<D> TrackerState<D> {
    pub(crate) fn new(unit: Unit) -> (Self, ProgressReceiver<D>) {
        let (delivery, rx) = Delivery::open();
        let state = Self {
            acc: Accumulator::new(unit),
            window: SpeedWindow::new(DEFAULT_WINDOW_SIZE),
            throttle: Throttle::default(),
            last_sent: None,
            closed: false,
            delivery,
        };
        (state, rx)
    }

    pub(crate) fn park(&mut self, rx: ProgressReceiver<D>) {
        self.delivery.park(rx);
    }

    pub(crate) fn take_receiver(&mut self) -> Option<ProgressReceiver<D>> {
        self.delivery.take_receiver()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark closed; the next `advance` produces the terminal snapshot.
    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    /// Record `delta` more units and maybe deliver a snapshot.
    ///
    /// A zero delta only re-evaluates (used by `stop`). Returns a payload-free
    /// copy of the terminal snapshot when this call produced it.
    pub(crate) fn advance(
        &mut self,
        delta: u64,
        data: Option<D>,
        now: Instant,
    ) -> Option<Progress<D>> {
        if self.closed && !self.delivery.is_open() {
            return None;
        }

        self.acc.processed = self.acc.processed.saturating_add(delta);

        if self.throttled(now) {
            return None;
        }

        let wall = SystemTime::now();
        if self.acc.started.is_none() {
            self.acc.started = Some(Started { at: now, wall });
        }
        self.window.record(self.acc.processed, now);

        let mut progress: Progress<D> = snapshot::build(&self.acc, &self.window, now, wall);
        progress.data = data;

        if self.closed || self.acc.reached_total() {
            progress.completed = true;
            progress.finished = true;
            progress.stop_time = Some(wall);
            let terminal = progress.without_data();
            let delivered = self.delivery.offer(progress, self.throttle.mode);
            tracing::debug!(
                name = %self.acc.name,
                processed = self.acc.processed,
                delivered,
                "terminal snapshot offered"
            );
            self.teardown();
            return Some(terminal);
        }

        if self.filtered(&progress) {
            return None;
        }

        if self.delivery.offer(progress, self.throttle.mode) {
            self.last_sent = Some(now);
        }
        None
    }

    /// Within `update_freq` of the last delivery and not at the end yet.
    fn throttled(&self, now: Instant) -> bool {
        let Some(last) = self.last_sent else {
            return false;
        };
        if now.saturating_duration_since(last) >= self.throttle.update_freq {
            return false;
        }
        !self.closed && !self.acc.reached_total()
    }

    /// Granule filters against the previously recorded sample.
    fn filtered(&self, progress: &Progress<D>) -> bool {
        let Some(previous) = self.window.previous() else {
            return false;
        };
        let processed = self.acc.processed;
        if processed == previous {
            return true;
        }

        let granule = self.throttle.granule;
        if granule > 1 && previous / granule == processed / granule {
            return true;
        }

        let step = u64::from(self.throttle.granule_percent);
        if let (Some(total), Some(current)) = (self.acc.total, progress.percent) {
            if step > 0 {
                let before = snapshot::percent(previous, total) as u64;
                return before / step == current as u64 / step;
            }
        }
        false
    }

    fn teardown(&mut self) {
        self.closed = true;
        self.delivery.close();
        tracing::debug!(name = %self.acc.name, "delivery channel closed");
    }

    /// Back to an idle, unstarted tracker. Opens a fresh channel if the
    /// previous run tore delivery down; its receiver is parked for
    /// `take_receiver`.
    pub(crate) fn reset(&mut self) {
        self.acc.processed = 0;
        self.acc.started = None;
        self.last_sent = None;
        self.window.clear();
        if !self.delivery.is_open() {
            let (delivery, rx) = Delivery::open();
            self.delivery = delivery;
            self.delivery.park(rx);
        }
        self.closed = false;
    }

    /// Current snapshot without recording a sample or delivering it.
    pub(crate) fn snapshot(&self, now: Instant) -> Progress<D> {
        snapshot::build(&self.acc, &self.window, now, SystemTime::now())
    }
}
