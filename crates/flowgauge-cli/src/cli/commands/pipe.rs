//! `flowgauge pipe` – stdin to stdout with progress on stderr.

use anyhow::{Context, Result};
use flowgauge_core::config::TrackerConfig;
use flowgauge_core::{DeliveryMode, Tracker};
use tokio::io::AsyncWriteExt;

use crate::cli::printer::spawn_printer;

pub async fn run_pipe(cfg: &TrackerConfig, size: Option<u64>, json: bool) -> Result<()> {
    let tracker = Tracker::bytes();
    tracker.apply_config(cfg).set_name("stdin");
    if cfg.delivery == DeliveryMode::Blocking {
        // Snapshots are offered from inside the runtime here.
        tracing::debug!("pipe ignores blocking delivery");
        tracker.set_delivery(DeliveryMode::BestEffort);
    }
    let rx = tracker
        .take_receiver()
        .context("progress receiver already taken")?;
    let printer = spawn_printer(rx, json);

    let size = size.map_or(-1, |s| i64::try_from(s).unwrap_or(i64::MAX));
    let mut reader = tracker.async_reader(tokio::io::stdin(), size);
    let mut stdout = tokio::io::stdout();
    let copied = tokio::io::copy(&mut reader, &mut stdout)
        .await
        .context("pipe stdin to stdout")?;
    stdout.flush().await?;
    reader.finish();

    printer.await?;
    tracing::info!(bytes = copied, "pipe finished");
    Ok(())
}
