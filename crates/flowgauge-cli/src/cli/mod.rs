//! CLI for flowgauge.

mod commands;
mod printer;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flowgauge_core::config::{self, TrackerConfig};
use flowgauge_core::units::{self, Unit};
use flowgauge_core::DeliveryMode;
use std::path::PathBuf;

use commands::{run_checksum, run_copy, run_format, run_pipe};

/// Top-level CLI for flowgauge.
#[derive(Debug, Parser)]
#[command(name = "flowgauge")]
#[command(about = "flowgauge: stream copies with throttled live progress", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub tuning: TuningArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the tracker settings loaded from config.toml.
#[derive(Debug, Default, Args)]
pub struct TuningArgs {
    /// Minimum milliseconds between two progress lines.
    #[arg(long, global = true, value_name = "MS")]
    pub update_freq_ms: Option<u64>,
    /// Only report when the byte count crosses a multiple of N.
    #[arg(long, global = true, value_name = "N")]
    pub granule: Option<u64>,
    /// Only report when the percentage crosses a multiple of P.
    #[arg(long, global = true, value_name = "P")]
    pub granule_percent: Option<u32>,
    /// Samples used for the current speed.
    #[arg(long, global = true, value_name = "N")]
    pub window_size: Option<usize>,
    /// Never drop snapshots; the transfer waits for the printer.
    #[arg(long, global = true)]
    pub blocking: bool,
}

impl TuningArgs {
    pub fn apply(&self, cfg: &mut TrackerConfig) {
        if let Some(ms) = self.update_freq_ms {
            cfg.update_freq_ms = ms;
        }
        if let Some(g) = self.granule {
            cfg.update_granule = g;
        }
        if let Some(p) = self.granule_percent {
            cfg.update_granule_percent = p;
        }
        if let Some(w) = self.window_size {
            cfg.window_size = w;
        }
        if self.blocking {
            cfg.delivery = DeliveryMode::Blocking;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Metric bytes (kB, MB, ...).
    Bytes,
    /// IEC bytes (KiB, MiB, ...).
    Iec,
    /// JEDEC bytes (1024 steps, KB, MB, GB).
    Jedec,
    /// Metres and kilometres.
    Distance,
    /// Plain counts (k, M, G, ...).
    Count,
}

impl UnitArg {
    pub fn unit(self) -> Unit {
        match self {
            UnitArg::Bytes => units::BYTES_METRIC,
            UnitArg::Iec => units::BYTES_IEC,
            UnitArg::Jedec => units::BYTES_JEDEC,
            UnitArg::Distance => units::DISTANCE_METRIC,
            UnitArg::Count => units::COUNT,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy a file, reporting progress on stderr.
    Copy {
        /// Source file.
        src: PathBuf,
        /// Destination file (created or truncated).
        dest: PathBuf,
        /// Print snapshots as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Copy stdin to stdout, reporting progress on stderr.
    Pipe {
        /// Expected number of bytes, enables percent and remaining time.
        #[arg(long, value_name = "BYTES")]
        size: Option<u64>,
        /// Print snapshots as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Compute SHA-256 of a file, reporting progress on stderr.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Format a raw amount in a unit standard.
    Format {
        /// Amount in base units.
        value: u64,
        #[arg(long, value_enum, default_value = "bytes")]
        unit: UnitArg,
        /// Long unit names ("10.00 mebibyte") instead of short ones.
        #[arg(long)]
        long: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cli.tuning.apply(&mut cfg);
        tracing::debug!("effective tracker config: {:?}", cfg);

        match cli.command {
            CliCommand::Copy { src, dest, json } => run_copy(&cfg, src, dest, json).await?,
            CliCommand::Pipe { size, json } => run_pipe(&cfg, size, json).await?,
            CliCommand::Checksum { path } => run_checksum(&cfg, path).await?,
            CliCommand::Format { value, unit, long } => run_format(value, unit, long),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
