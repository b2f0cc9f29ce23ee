use std::fs::File;
use std::io::{self, BufRead, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};
use crate::tracker::{ProgressReceiver, Tracker};
use crate::units::BYTES_METRIC;

/// [`Read`] pass-through that counts every byte returned by the inner reader.
#[derive(Debug)]
pub struct ProgressReader<R, D = ()> {
    inner: R,
    tracker: Tracker<D>,
}

impl<R: Read> ProgressReader<R> {
    /// Wrap `inner` with a metric-bytes tracker. A negative `size` means the
    /// total is unknown.
    pub fn new(inner: R, size: i64) -> (Self, ProgressReceiver) {
        let (tracker, rx) = Tracker::channel(BYTES_METRIC);
        (tracker.reader(inner, size), rx)
    }
}

impl ProgressReader<File> {
    /// Open `path` for reading; its current length becomes the total and its
    /// display path the tracker name.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, ProgressReceiver)> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = probe_size(&mut file).map_err(|source| Error::Probe {
            path: path.to_path_buf(),
            source,
        })?;
        let (reader, rx) = Self::new(file, i64::try_from(size).unwrap_or(i64::MAX));
        reader.tracker().set_name(path.display().to_string());
        Ok((reader, rx))
    }
}

/// Seek to the end to learn the length, then rewind.
fn probe_size<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(len)
}

impl<R, D> ProgressReader<R, D> {
    pub(crate) fn with_tracker(inner: R, tracker: Tracker<D>) -> Self {
        Self { inner, tracker }
    }

    /// The tracker behind this reader, for configuration and inspection.
    pub fn tracker(&self) -> &Tracker<D> {
        &self.tracker
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Reading through this reference bypasses the tracker.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Stop the tracker and return the inner reader.
    pub fn finish(self) -> R {
        let Self { inner, tracker } = self;
        tracker.stop();
        inner
    }
}

impl<R: Read, D> Read for ProgressReader<R, D> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.tracker.increment(n as u64);
        }
        Ok(n)
    }
}

impl<R: BufRead, D> BufRead for ProgressReader<R, D> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
        if amt > 0 {
            self.tracker.increment(amt as u64);
        }
    }
}
