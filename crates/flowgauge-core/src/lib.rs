//! Core of flowgauge: progress tracking for instrumented streams.
//!
//! - [`tracker`]: the engine (throttling, speed window, single-slot delivery)
//! - [`progress`]: snapshot type handed to consumers
//! - [`io`]: `Read`/`Write` and tokio adapters feeding a tracker
//! - [`units`]: unit tables and human-readable formatting
//! - [`config`], [`logging`]: XDG config file and tracing setup

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod progress;
pub mod tracker;
pub mod units;

pub use error::Error;
pub use progress::Progress;
pub use tracker::{DeliveryMode, ProgressReceiver, Tracker};
