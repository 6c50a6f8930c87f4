//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the client keeps its configuration file and log files.
//! Nothing here touches the network or application state.

pub mod paths;

pub use paths::{config_path, data_dir, expand_tilde};
