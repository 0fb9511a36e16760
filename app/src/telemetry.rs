//! Logging setup for the terminal screen
//!
//! Log output goes to stderr so stdout stays reserved for the screen.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use em_shared::{LogFormat, LoggingConfig};

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow!("invalid log level {:?}: {}", config.level, e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
