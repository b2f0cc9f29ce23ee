//! `flowgauge checksum` – SHA-256 of a file, read through a progress reader.

use anyhow::{Context, Result};
use flowgauge_core::config::TrackerConfig;
use flowgauge_core::io::ProgressReader;
use sha2::{Digest, Sha256};
use std::io::{self, Read};
use std::path::PathBuf;

use crate::cli::printer::spawn_printer;

const BUF_SIZE: usize = 64 * 1024;

/// SHA-256 of everything `reader` yields, as lowercase hex.
pub fn sha256_reader<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute and print SHA-256 of the given file.
pub async fn run_checksum(cfg: &TrackerConfig, path: PathBuf) -> Result<()> {
    let (reader, rx) = ProgressReader::open(&path)?;
    reader.tracker().apply_config(cfg);
    let printer = spawn_printer(rx, false);

    let digest = tokio::task::spawn_blocking(move || {
        let mut reader = reader;
        let digest = sha256_reader(&mut reader)?;
        reader.finish();
        Ok::<_, io::Error>(digest)
    })
    .await?
    .with_context(|| format!("read {}", path.display()))?;

    printer.await?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
