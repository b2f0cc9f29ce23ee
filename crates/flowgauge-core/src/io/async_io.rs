//! `tokio::io` flavours of the adapters.
//!
//! Snapshots are offered with the tracker's delivery mode; use the default
//! best-effort mode here, blocking delivery panics inside a runtime.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::tracker::{ProgressReceiver, Tracker};
use crate::units::BYTES_METRIC;

/// [`AsyncRead`] pass-through that counts the bytes each poll fills in.
#[derive(Debug)]
pub struct AsyncProgressReader<R, D = ()> {
    inner: R,
    tracker: Tracker<D>,
}

impl<R: AsyncRead + Unpin> AsyncProgressReader<R> {
    pub fn new(inner: R, size: i64) -> (Self, ProgressReceiver) {
        let (tracker, rx) = Tracker::channel(BYTES_METRIC);
        (tracker.async_reader(inner, size), rx)
    }
}

impl<R, D> AsyncProgressReader<R, D> {
    pub(crate) fn with_tracker(inner: R, tracker: Tracker<D>) -> Self {
        Self { inner, tracker }
    }

    pub fn tracker(&self) -> &Tracker<D> {
        &self.tracker
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn finish(self) -> R {
        let Self { inner, tracker } = self;
        tracker.stop();
        inner
    }
}

impl<R: AsyncRead + Unpin, D> AsyncRead for AsyncProgressReader<R, D> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let res = Pin::new(&mut this.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = res {
            let n = buf.filled().len() - before;
            if n > 0 {
                this.tracker.increment(n as u64);
            }
        }
        res
    }
}

/// [`AsyncWrite`] pass-through; `poll_shutdown` stops the tracker once the
/// inner writer has shut down.
#[derive(Debug)]
pub struct AsyncProgressWriter<W, D = ()> {
    inner: W,
    tracker: Tracker<D>,
}

impl<W: AsyncWrite + Unpin> AsyncProgressWriter<W> {
    pub fn new(inner: W, size: i64) -> (Self, ProgressReceiver) {
        let (tracker, rx) = Tracker::channel(BYTES_METRIC);
        (tracker.async_writer(inner, size), rx)
    }
}

impl<W, D> AsyncProgressWriter<W, D> {
    pub(crate) fn with_tracker(inner: W, tracker: Tracker<D>) -> Self {
        Self { inner, tracker }
    }

    pub fn tracker(&self) -> &Tracker<D> {
        &self.tracker
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Stop the tracker and return the inner writer without shutting it down.
    pub fn into_inner(self) -> W {
        let Self { inner, tracker } = self;
        tracker.stop();
        inner
    }
}

impl<W: AsyncWrite + Unpin, D> AsyncWrite for AsyncProgressWriter<W, D> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let res = Pin::new(&mut this.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = res {
            if n > 0 {
                this.tracker.increment(n as u64);
            }
        }
        res
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let res = Pin::new(&mut this.inner).poll_shutdown(cx);
        if res.is_ready() {
            this.tracker.stop();
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn async_reader_counts_and_completes() {
        let data = vec![3u8; 4096];
        let (mut reader, mut rx) = AsyncProgressReader::new(&data[..], 4096);
        let mut out = vec![0u8; 4096];
        reader.read_exact(&mut out).await.unwrap();
        assert_eq!(out, data);
        assert_eq!(reader.tracker().processed(), 4096);
        assert!(reader.tracker().is_closed());

        let mut last = None;
        while let Some(p) = rx.recv().await {
            last = Some(p);
        }
        assert_eq!(last.map(|p| p.processed), Some(4096));
    }

    #[tokio::test]
    async fn async_writer_shutdown_stops_tracker() {
        let (mut writer, mut rx) = AsyncProgressWriter::new(Vec::new(), -1);
        writer.write_all(b"0123456789").await.unwrap();
        assert_eq!(rx.recv().await.unwrap().processed, 10);

        writer.shutdown().await.unwrap();
        assert!(writer.tracker().is_closed());
        let last = rx.recv().await.unwrap();
        assert!(last.finished);
        assert_eq!(last.processed, 10);
        assert!(rx.recv().await.is_none());
        assert_eq!(writer.get_ref(), b"0123456789");
    }

    #[tokio::test]
    async fn dropping_async_reader_closes_channel() {
        let (reader, mut rx) = AsyncProgressReader::new(&b"abc"[..], -1);
        drop(reader);
        let last = rx.recv().await.unwrap();
        assert!(last.finished);
        assert_eq!(last.processed, 0);
        assert!(rx.recv().await.is_none());
    }
}
