//! Consumer side: drains a tracker's channel and prints to stderr.

use anyhow::Result;
use flowgauge_core::{Progress, ProgressReceiver};
use std::io::Write;
use tokio::task::JoinHandle;

/// One output line for `p`: the text rendering, or a JSON object.
pub fn render_line(p: &Progress, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(p)?)
    } else {
        Ok(p.to_string())
    }
}

/// Print every snapshot until the tracker closes the channel. Text output
/// rewrites a single line and ends it on the terminal snapshot.
pub fn spawn_printer(mut rx: ProgressReceiver, json: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut open_line = false;
        while let Some(p) = rx.recv().await {
            let line = match render_line(&p, json) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("failed to render progress: {:#}", e);
                    continue;
                }
            };
            let mut err = std::io::stderr().lock();
            let _ = if json {
                writeln!(err, "{line}")
            } else {
                open_line = !p.finished;
                write!(err, "\r{line}{}", if p.finished { "\n" } else { "" })
            };
            let _ = err.flush();
        }
        if open_line {
            eprintln!();
        }
    })
}
