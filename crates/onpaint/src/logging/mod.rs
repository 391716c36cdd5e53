//! Logger setup.
//!
//! The crate itself only talks to the `log` facade; this module is a
//! convenience for binaries that want `env_logger` with sane defaults.

mod init;

pub use init::{init_logging, LoggingConfig};
