//! Logger setup for binaries and examples built on yamlknobs.
//!
//! Library code only uses the `log` facade; this is the one place that
//! picks a backend.

mod init;

pub use init::{LoggingConfig, init_logging};
