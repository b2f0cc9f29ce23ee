use flowgauge_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Progress goes to stderr, so file logging must not fail the run.
    if let Err(file_err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable, using stderr: {:#}", file_err),
            Err(err) => eprintln!("flowgauge: logging disabled: {:#}", err),
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("flowgauge error: {:#}", err);
        std::process::exit(1);
    }
}
