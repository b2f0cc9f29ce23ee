use std::io::{self, Write};

use crate::tracker::{ProgressReceiver, Tracker};
use crate::units::BYTES_METRIC;

/// [`Write`] pass-through that counts every byte the inner writer accepts.
#[derive(Debug)]
pub struct ProgressWriter<W, D = ()> {
    inner: W,
    tracker: Tracker<D>,
}

impl<W: Write> ProgressWriter<W> {
    /// Wrap `inner` with a metric-bytes tracker. A negative `size` means the
    /// total is unknown.
    pub fn new(inner: W, size: i64) -> (Self, ProgressReceiver) {
        let (tracker, rx) = Tracker::channel(BYTES_METRIC);
        (tracker.writer(inner, size), rx)
    }
}

impl<W, D> ProgressWriter<W, D> {
    pub(crate) fn with_tracker(inner: W, tracker: Tracker<D>) -> Self {
        Self { inner, tracker }
    }

    pub fn tracker(&self) -> &Tracker<D> {
        &self.tracker
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writing through this reference bypasses the tracker.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W: Write, D> ProgressWriter<W, D> {
    /// Flush, stop the tracker and return the inner writer. The tracker is
    /// stopped even when the flush fails.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        let Self { inner, tracker } = self;
        tracker.stop();
        Ok(inner)
    }
}

impl<W: Write, D> Write for ProgressWriter<W, D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if n > 0 {
            self.tracker.increment(n as u64);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
