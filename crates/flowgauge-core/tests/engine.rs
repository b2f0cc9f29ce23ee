//! End-to-end engine behaviour with a real consumer thread.

mod common;

use std::thread;
use std::time::Duration;

use common::{assert_single_terminal, spawn_consumer};
use flowgauge_core::tracker::Tracker;
use flowgauge_core::units::COUNT;
use flowgauge_core::DeliveryMode;

#[test]
fn granule_limits_deliveries_end_to_end() {
    let tracker = Tracker::bytes();
    tracker
        .set_size(6_000_000)
        .set_update_granule(600_000)
        .set_update_freq(Duration::from_millis(1))
        .set_delivery(DeliveryMode::Blocking);
    let consumer = spawn_consumer(tracker.take_receiver().unwrap());

    for _ in 0..60 {
        tracker.increment(100_000);
        thread::sleep(Duration::from_millis(2));
    }
    assert!(tracker.is_closed());
    drop(tracker);

    let seen = consumer.join().unwrap();
    let intermediate = seen.iter().filter(|p| !p.finished).count();
    assert!(intermediate <= 10, "{intermediate} intermediate snapshots");
    let last = assert_single_terminal(&seen);
    assert_eq!(last.processed, 6_000_000);
    assert!(last.completed);
    assert_eq!(last.percent, Some(100.0));
    assert!(seen.windows(2).all(|w| w[0].processed < w[1].processed));
}

#[test]
fn granule_limits_deliveries_with_default_delivery() {
    let tracker = Tracker::bytes();
    tracker.set_size(6_000_000).set_update_granule(600_000);
    let consumer = spawn_consumer(tracker.take_receiver().unwrap());

    for _ in 0..60 {
        tracker.increment(100_000);
        thread::sleep(Duration::from_millis(10));
    }
    assert!(tracker.is_closed());
    drop(tracker);

    let seen = consumer.join().unwrap();
    let intermediate = seen.iter().filter(|p| !p.finished).count();
    assert!(intermediate <= 10, "{intermediate} intermediate snapshots");
    let last = assert_single_terminal(&seen);
    assert_eq!(last.processed, 6_000_000);
    assert!(seen.windows(2).all(|w| w[0].processed < w[1].processed));
}

#[test]
fn delivered_snapshots_respect_update_freq() {
    let freq = Duration::from_millis(30);
    let tracker = Tracker::new(COUNT);
    tracker.set_update_freq(freq);
    let consumer = spawn_consumer(tracker.take_receiver().unwrap());

    for _ in 0..150 {
        tracker.increment(1);
        thread::sleep(Duration::from_millis(1));
    }
    tracker.stop();
    drop(tracker);

    let seen = consumer.join().unwrap();
    let intermediate: Vec<_> = seen.iter().filter(|p| !p.finished).collect();
    assert!(!intermediate.is_empty());
    for pair in intermediate.windows(2) {
        assert!(
            pair[1].elapsed - pair[0].elapsed >= freq,
            "deliveries {:?} and {:?} too close",
            pair[0].elapsed,
            pair[1].elapsed
        );
    }
}

#[test]
fn stop_without_total_finishes_once() {
    let tracker = Tracker::new(COUNT);
    tracker.set_update_freq(Duration::ZERO).set_blocking_delivery(true);
    let consumer = spawn_consumer(tracker.take_receiver().unwrap());

    for v in [5, 3, 5, 12, 40] {
        tracker.update(v);
    }
    let terminal = tracker.stop().unwrap();
    assert!(tracker.stop().is_none());
    tracker.increment(100);
    drop(tracker);

    let seen = consumer.join().unwrap();
    let processed: Vec<_> = seen.iter().map(|p| p.processed).collect();
    assert_eq!(processed, vec![5, 12, 40, 40]);
    let last = assert_single_terminal(&seen);
    assert_eq!(last.processed, terminal.processed);
    assert!(last.percent.is_none() && last.remaining.is_none());
    assert!(last.stop_time.is_some());
}

#[test]
fn reset_runs_a_second_transfer() {
    let tracker = Tracker::new(COUNT);
    tracker
        .set_size(10)
        .set_update_freq(Duration::ZERO)
        .set_blocking_delivery(true);

    for _ in 0..2 {
        let consumer = spawn_consumer(tracker.take_receiver().unwrap());
        for _ in 0..10 {
            tracker.increment(1);
        }
        let seen = consumer.join().unwrap();
        assert_eq!(seen.len(), 10);
        assert_eq!(assert_single_terminal(&seen).processed, 10);
        tracker.reset();
    }
}
