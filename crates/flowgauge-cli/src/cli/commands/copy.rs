//! `flowgauge copy` – copy a file with progress.

use anyhow::{Context, Result};
use flowgauge_core::config::TrackerConfig;
use flowgauge_core::io::ProgressReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::cli::printer::spawn_printer;

pub async fn run_copy(cfg: &TrackerConfig, src: PathBuf, dest: PathBuf, json: bool) -> Result<()> {
    let (reader, rx) = ProgressReader::open(&src)?;
    reader.tracker().apply_config(cfg);
    let printer = spawn_printer(rx, json);

    // The copy runs off the runtime so blocking delivery can wait on the printer.
    let dest_display = dest.display().to_string();
    let copied = tokio::task::spawn_blocking(move || -> Result<u64> {
        let mut reader = reader;
        let mut out =
            File::create(&dest).with_context(|| format!("create {}", dest.display()))?;
        let n = io::copy(&mut reader, &mut out)
            .with_context(|| format!("copy to {}", dest.display()))?;
        reader.finish();
        Ok(n)
    })
    .await??;

    printer.await?;
    tracing::info!(bytes = copied, src = %src.display(), dest = %dest_display, "copy finished");
    Ok(())
}
