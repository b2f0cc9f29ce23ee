//! Stream adapters that feed a [`Tracker`](crate::tracker::Tracker) from
//! I/O calls.
//!
//! Each adapter owns its tracker. Dropping the adapter drops the tracker,
//! which stops it, so the consumer sees the terminal snapshot on every exit
//! path. `finish` does the same explicitly and hands back the inner stream.

mod async_io;
mod reader;
mod writer;

pub use async_io::{AsyncProgressReader, AsyncProgressWriter};
pub use reader::ProgressReader;
pub use writer::ProgressWriter;
