//! Logger setup.
//!
//! The crate itself only talks to the `log` facade; this module installs
//! `env_logger` for binaries that want it.

mod init;

pub use init::{LoggingConfig, init_logging};
