//! Diagnostic logging.
//!
//! Progress lines for the user are printed directly; everything else goes
//! through the `log` facade and is only shown when asked for.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "asset_gen=debug"). When unset, `RUST_LOG` is consulted, then `level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            level: log::LevelFilter::Warn,
        }
    }
}

impl LoggingConfig {
    /// Maps the number of `-v` flags to a level: warn, info, then debug.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };
        Self {
            env_filter: None,
            level,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.level);
        }

        builder.format_timestamp(None);
        // Another logger may already be installed (tests).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
