//! Errors surfaced when building instrumented streams.
//!
//! The tracker itself never fails; only opening and probing the wrapped
//! resource can.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file to instrument could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Seeking to the end (or back to the start) to learn the size failed.
    #[error("failed to probe size of {}: {source}", path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
