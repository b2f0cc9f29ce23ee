//! Single-slot hand-off of snapshots to the consumer.
//!
//! The channel holds at most one undelivered snapshot. In best-effort mode a
//! snapshot that finds the slot occupied is dropped; the next update produces
//! a fresh one. Blocking mode waits for the slot instead and can stall the
//! producer for as long as nobody drains the receiver.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::progress::Progress;

/// Snapshots buffered between producer and consumer.
pub const CHANNEL_CAPACITY: usize = 1;

/// Consumer end of a tracker's delivery channel.
pub type ProgressReceiver<D = ()> = mpsc::Receiver<Progress<D>>;

/// How snapshots are handed to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// `try_send`: drop the snapshot when the consumer is not ready.
    #[default]
    BestEffort,
    /// `blocking_send`: wait for the consumer. Must not be used from inside
    /// an async runtime, and stalls the instrumented I/O if nobody drains.
    Blocking,
}

/// Sender half plus the receiver parked until a consumer takes it.
#[derive(Debug)]
pub(crate) struct Delivery<D> {
    tx: Option<mpsc::Sender<Progress<D>>>,
    parked: Option<ProgressReceiver<D>>,
}

impl<D> Delivery<D> {
    pub(crate) fn open() -> (Self, ProgressReceiver<D>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (
            Self {
                tx: Some(tx),
                parked: None,
            },
            rx,
        )
    }

    pub(crate) fn park(&mut self, rx: ProgressReceiver<D>) {
        self.parked = Some(rx);
    }

    pub(crate) fn take_receiver(&mut self) -> Option<ProgressReceiver<D>> {
        self.parked.take()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// Offer `progress` to the consumer. Returns true if it was accepted.
    ///
    /// A parked receiver can only be taken under the tracker lock the caller
    /// holds, so blocking mode degrades to best-effort until it is taken.
    pub(crate) fn offer(&self, progress: Progress<D>, mode: DeliveryMode) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };
        let mode = if self.parked.is_some() {
            DeliveryMode::BestEffort
        } else {
            mode
        };
        match mode {
            DeliveryMode::BestEffort => match tx.try_send(progress) {
                Ok(()) => true,
                Err(TrySendError::Full(p)) => {
                    tracing::trace!(processed = p.processed, "consumer busy, snapshot dropped");
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            },
            DeliveryMode::Blocking => tx.blocking_send(progress).is_ok(),
        }
    }

    /// Drop the sender; the consumer sees the channel close once it has
    /// drained what is buffered.
    pub(crate) fn close(&mut self) {
        self.tx = None;
    }
}
