//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::io::{self, Read};
use std::thread::{self, JoinHandle};

use flowgauge_core::{Progress, ProgressReceiver};

/// Drain `rx` on a plain thread until the tracker closes the channel.
pub fn spawn_consumer(mut rx: ProgressReceiver) -> JoinHandle<Vec<Progress>> {
    thread::spawn(move || {
        let mut seen = Vec::new();
        while let Some(p) = rx.blocking_recv() {
            seen.push(p);
        }
        seen
    })
}

/// Reader over `len` zero bytes that returns at most `chunk` bytes per call.
pub struct ChunkedReader {
    remaining: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(len: usize, chunk: usize) -> Self {
        Self {
            remaining: len,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.remaining.min(self.chunk).min(buf.len());
        buf[..n].fill(0);
        self.remaining -= n;
        Ok(n)
    }
}

/// Exactly one snapshot in `seen` is terminal, and it is the last one.
pub fn assert_single_terminal(seen: &[Progress]) -> &Progress {
    let finished: Vec<_> = seen.iter().filter(|p| p.finished).collect();
    assert_eq!(finished.len(), 1, "expected exactly one terminal snapshot");
    let last = seen.last().expect("at least one snapshot");
    assert!(last.finished, "terminal snapshot must come last");
    last
}
