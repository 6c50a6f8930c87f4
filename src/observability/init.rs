//! Tracing initialization and subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "libris.log";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters events with `RUST_LOG`, else `config.trace_level`, else `info`
/// 2. Formats them as plain text without ANSI colors
/// 3. Appends them to `<data dir>/libris.log`, rotated at 10 MB with 3 backups
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips logging if the directory cannot be created
/// - Idempotent: only the first call takes effect
///
/// # Example
///
/// ```rust
/// use libris::observability::init_tracing;
/// use libris::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    INITIALIZED.get_or_init(|| install(config));
}

fn install(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }
    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init();
}
