//! Progress tracker engine.
//!
//! A [`Tracker`] accumulates work counts from a producer (usually a stream
//! adapter on a hot I/O path) and hands [`Progress`] snapshots to one
//! consumer over a single-slot channel. Delivery is rate limited by time
//! (`update_freq`) and by work (`update_granule`, `update_granule_percent`),
//! and never blocks the producer unless [`DeliveryMode::Blocking`] is chosen.
//!
//! Every run ends with exactly one terminal snapshot (`finished == true`),
//! produced when the total is reached, when [`Tracker::stop`] is called, or
//! when the tracker is dropped. The channel closes right after it.
//!
//! ```no_run
//! use flowgauge_core::tracker::Tracker;
//! use flowgauge_core::units::DISTANCE_METRIC;
//!
//! let tracker = Tracker::new(DISTANCE_METRIC);
//! tracker.set_size(2000).set_update_granule(100);
//! let mut rx = tracker.take_receiver().expect("fresh tracker");
//! let consumer = std::thread::spawn(move || {
//!     while let Some(p) = rx.blocking_recv() {
//!         println!("{p}");
//!     }
//! });
//! for _ in 0..200 {
//!     tracker.increment(10);
//! }
//! consumer.join().unwrap();
//! ```

mod delivery;
mod snapshot;
mod state;
mod window;


use std::io::{Read, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::TrackerConfig;
use crate::io::{AsyncProgressReader, AsyncProgressWriter, ProgressReader, ProgressWriter};
use crate::progress::Progress;
use crate::units::{Unit, BYTES_METRIC};
use state::TrackerState;

pub use delivery::{DeliveryMode, ProgressReceiver, CHANNEL_CAPACITY};
pub use state::{DEFAULT_UPDATE_FREQ, DEFAULT_UPDATE_GRANULE};
pub use window::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};

/// Thread-safe progress tracker. `D` is an optional payload attached to
/// individual updates and surfaced as [`Progress::data`].
///
/// Setters return `&Self` for chaining. Configure before the first update;
/// changing settings mid-run is allowed but takes effect on the next update.
#[derive(Debug)]
pub struct Tracker<D = ()> {
    state: Mutex<TrackerState<D>>,
}

impl Tracker {
    /// New tracker for `unit`; the receiver is kept until [`Tracker::take_receiver`].
    pub fn new(unit: Unit) -> Self {
        Self::with_data(unit)
    }

    /// New tracker counting bytes (metric units).
    pub fn bytes() -> Self {
        Self::new(BYTES_METRIC)
    }

    /// New tracker together with its receiver.
    pub fn channel(unit: Unit) -> (Self, ProgressReceiver) {
        Self::channel_with_data(unit)
    }
}

impl<D> Tracker<D> {
    /// New tracker carrying payloads of type `D`.
    pub fn with_data(unit: Unit) -> Self {
        let (mut state, rx) = TrackerState::new(unit);
        state.park(rx);
        Self {
            state: Mutex::new(state),
        }
    }

    /// New payload-carrying tracker together with its receiver.
    pub fn channel_with_data(unit: Unit) -> (Self, ProgressReceiver<D>) {
        let (state, rx) = TrackerState::new(unit);
        (
            Self {
                state: Mutex::new(state),
            },
            rx,
        )
    }

    // State stays consistent across a panic in the consumer-facing code, so a
    // poisoned lock is simply reused.
    fn lock(&self) -> MutexGuard<'_, TrackerState<D>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand out the consumer end of the channel. `None` if it was already
    /// taken or the tracker was built with [`Tracker::channel`].
    pub fn take_receiver(&self) -> Option<ProgressReceiver<D>> {
        self.lock().take_receiver()
    }

    /// Total work; a negative size means unknown. A zero total is reached
    /// by the first update.
    pub fn set_size(&self, size: i64) -> &Self {
        self.lock().acc.total = u64::try_from(size).ok();
        self
    }

    /// Minimum interval between two delivered snapshots.
    pub fn set_update_freq(&self, freq: Duration) -> &Self {
        self.lock().throttle.update_freq = freq;
        self
    }

    /// Only deliver when the processed count crosses a multiple of `granule`.
    pub fn set_update_granule(&self, granule: u64) -> &Self {
        self.lock().throttle.granule = granule;
        self
    }

    /// Only deliver when the percent crosses a multiple of `percent`
    /// (0 disables). Needs a known total.
    pub fn set_update_granule_percent(&self, percent: u32) -> &Self {
        self.lock().throttle.granule_percent = percent;
        self
    }

    /// Number of samples in the speed window (at least [`MIN_WINDOW_SIZE`]).
    /// Discards the samples collected so far.
    pub fn set_window_size(&self, size: usize) -> &Self {
        self.lock().window = window::SpeedWindow::new(size);
        self
    }

    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        self.lock().acc.name = name.into();
        self
    }

    pub fn set_unit(&self, unit: Unit) -> &Self {
        self.lock().acc.unit = unit;
        self
    }

    pub fn set_delivery(&self, mode: DeliveryMode) -> &Self {
        self.lock().throttle.mode = mode;
        self
    }

    /// Shorthand for `set_delivery(DeliveryMode::Blocking)`.
    ///
    /// Blocking delivery never loses snapshots but stalls every update until
    /// the consumer drains the slot; with no consumer it stalls forever.
    /// Until the receiver is taken out of the tracker, snapshots are still
    /// offered best-effort.
    pub fn set_blocking_delivery(&self, blocking: bool) -> &Self {
        self.set_delivery(if blocking {
            DeliveryMode::Blocking
        } else {
            DeliveryMode::BestEffort
        })
    }

    /// Apply frequency, granules, window size and delivery mode from `cfg`.
    pub fn apply_config(&self, cfg: &TrackerConfig) -> &Self {
        self.set_update_freq(cfg.update_freq())
            .set_update_granule(cfg.update_granule)
            .set_update_granule_percent(cfg.update_granule_percent)
            .set_window_size(cfg.window_size)
            .set_delivery(cfg.delivery)
    }

    /// Record `delta` more units of work.
    pub fn increment(&self, delta: u64) {
        self.lock().advance(delta, None, Instant::now());
    }

    /// Record `delta` more units and attach `data` to the resulting snapshot.
    pub fn increment_with(&self, delta: u64, data: D) {
        self.lock().advance(delta, Some(data), Instant::now());
    }

    /// Record an absolute amount of work. Values not above the current
    /// count are ignored.
    pub fn update(&self, processed: u64) {
        self.update_inner(processed, None);
    }

    /// [`Tracker::update`] with a payload.
    pub fn update_with(&self, processed: u64, data: D) {
        self.update_inner(processed, Some(data));
    }

    fn update_inner(&self, processed: u64, data: Option<D>) {
        let mut state = self.lock();
        if processed > state.acc.processed {
            let delta = processed - state.acc.processed;
            state.advance(delta, data, Instant::now());
        }
    }

    /// Close the tracker and offer the terminal snapshot. Returns it when
    /// this call produced it; later calls return `None`.
    pub fn stop(&self) -> Option<Progress<D>> {
        let mut state = self.lock();
        state.close();
        state.advance(0, None, Instant::now())
    }

    /// Clear counters and samples so the tracker can be reused for a new
    /// run. Must not race with a consumer still draining the previous run.
    pub fn reset(&self) -> &Self {
        self.lock().reset();
        self
    }

    /// Snapshot of the current state; neither recorded nor delivered.
    pub fn snapshot(&self) -> Progress<D> {
        self.lock().snapshot(Instant::now())
    }

    pub fn processed(&self) -> u64 {
        self.lock().acc.processed
    }

    pub fn total(&self) -> Option<u64> {
        self.lock().acc.total
    }

    pub fn window_size(&self) -> usize {
        self.lock().window.capacity()
    }

    /// True once the terminal snapshot has been produced.
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    /// Wrap `inner` so every read feeds this tracker. A negative `size` keeps
    /// the total unknown.
    pub fn reader<R: Read>(self, inner: R, size: i64) -> ProgressReader<R, D> {
        self.set_size(size);
        ProgressReader::with_tracker(inner, self)
    }

    /// Wrap `inner` so every write feeds this tracker.
    pub fn writer<W: Write>(self, inner: W, size: i64) -> ProgressWriter<W, D> {
        self.set_size(size);
        ProgressWriter::with_tracker(inner, self)
    }

    /// Async counterpart of [`Tracker::reader`].
    pub fn async_reader<R: AsyncRead + Unpin>(
        self,
        inner: R,
        size: i64,
    ) -> AsyncProgressReader<R, D> {
        self.set_size(size);
        AsyncProgressReader::with_tracker(inner, self)
    }

    /// Async counterpart of [`Tracker::writer`].
    pub fn async_writer<W: AsyncWrite + Unpin>(
        self,
        inner: W,
        size: i64,
    ) -> AsyncProgressWriter<W, D> {
        self.set_size(size);
        AsyncProgressWriter::with_tracker(inner, self)
    }
}

/// Dropping a tracker stops it, so a consumer always sees the terminal
/// snapshot and the channel closing.
impl<D> Drop for Tracker<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
