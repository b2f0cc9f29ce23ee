//! Stream adapters against real files and consumer threads.

mod common;

use std::fs;
use std::io::{self, Read, Write};

use common::{assert_single_terminal, spawn_consumer, ChunkedReader};
use flowgauge_core::io::{ProgressReader, ProgressWriter};
use flowgauge_core::tracker::Tracker;
use flowgauge_core::units::BYTES_IEC;
use flowgauge_core::{DeliveryMode, Error};

#[test]
fn copy_file_through_reader_delivers_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.bin");
    let dest = dir.path().join("dest.bin");
    let body: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&src, &body).unwrap();

    let (mut reader, rx) = ProgressReader::open(&src).unwrap();
    reader
        .tracker()
        .set_delivery(DeliveryMode::Blocking)
        .set_update_freq(std::time::Duration::ZERO);
    let consumer = spawn_consumer(rx);

    let mut out = fs::File::create(&dest).unwrap();
    let copied = io::copy(&mut reader, &mut out).unwrap();
    assert_eq!(copied, 200_000);
    drop(reader);

    let seen = consumer.join().unwrap();
    let last = assert_single_terminal(&seen);
    assert_eq!(last.processed, 200_000);
    assert_eq!(last.total, Some(200_000));
    assert_eq!(last.name, src.display().to_string());
    assert_eq!(fs::read(&dest).unwrap(), body);
}

#[test]
fn configured_tracker_wraps_writer() {
    let tracker = Tracker::new(BYTES_IEC);
    tracker
        .set_name("upload")
        .set_update_granule(1024)
        .set_update_freq(std::time::Duration::ZERO)
        .set_blocking_delivery(true);
    let consumer = spawn_consumer(tracker.take_receiver().unwrap());

    let mut writer = tracker.writer(Vec::new(), 8 * 1024);
    for _ in 0..64 {
        writer.write_all(&[1u8; 128]).unwrap();
    }
    let buf = writer.finish().unwrap();
    assert_eq!(buf.len(), 8 * 1024);

    let seen = consumer.join().unwrap();
    // first write, seven KiB crossings, then the terminal at 8 KiB
    assert_eq!(seen.len(), 9);
    let last = assert_single_terminal(&seen);
    assert_eq!(last.name, "upload");
    assert_eq!(last.unit.name, "BytesIEC");
    assert!(last.to_string().starts_with("[100.00%] (8.00KiB/8.00KiB)"));
}

/// Reads 100-byte blocks until the source runs dry.
fn read_blocks(mut reader: ProgressReader<ChunkedReader>) -> io::Result<()> {
    let mut buf = [0u8; 100];
    loop {
        reader.read_exact(&mut buf)?;
    }
}

#[test]
fn early_return_still_finishes_tracker() {
    let (reader, rx) = ProgressReader::new(ChunkedReader::new(500, 100), -1);
    reader
        .tracker()
        .set_blocking_delivery(true)
        .set_update_freq(std::time::Duration::ZERO);
    let consumer = spawn_consumer(rx);

    let err = read_blocks(reader).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let seen = consumer.join().unwrap();
    // five blocks, then the terminal from dropping the reader
    assert_eq!(seen.len(), 6);
    assert_eq!(assert_single_terminal(&seen).processed, 500);
}

#[test]
fn open_reports_missing_file() {
    let err = ProgressReader::open("/definitely/not/here.bin").unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
    assert!(err.to_string().starts_with("failed to open /definitely/not/here.bin"));
}

#[test]
fn writer_new_counts_bytes() {
    let (mut writer, rx) = ProgressWriter::new(Vec::new(), -1);
    writer.tracker().set_blocking_delivery(true);
    let consumer = spawn_consumer(rx);
    writer.write_all(b"flowgauge").unwrap();
    writer.finish().unwrap();
    let seen = consumer.join().unwrap();
    assert_eq!(assert_single_terminal(&seen).processed, 9);
}
