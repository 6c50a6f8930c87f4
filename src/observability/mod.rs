//! Structured logging with file-based output.
//!
//! This module wires `tracing` macros used across the crate to a
//! `tracing-subscriber` pipeline writing plain-text lines to a rotating log
//! file in the data directory.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → libris.log (+ backups)
//! ```
//!
//! # Configuration
//!
//! The log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing once, early in the binary:
//!
//! ```rust
//! use libris::observability::init_tracing;
//! use libris::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("client initialized");
//! ```
//!
//! # Items
//!
//! - [`init_tracing`]: subscriber setup
//! - [`FileWriter`]: rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
