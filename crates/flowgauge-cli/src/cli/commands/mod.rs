//! CLI command handlers. Each command is in its own file.

mod checksum;
mod copy;
mod format;
mod pipe;

pub use checksum::run_checksum;
pub use copy::run_copy;
pub use format::run_format;
pub use pipe::run_pipe;
