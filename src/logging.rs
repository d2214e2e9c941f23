//! Logger bootstrap for the simulation binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset: simulation debug output only
/// when asked for, `info` otherwise.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("{},snatcher={level}", LevelFilter::Warn)
}

/// Installs the global logger.
///
/// `RUST_LOG` overrides the default filter. Repeated calls are ignored, so
/// tests may call this freely.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails when a logger is already installed.
    builder.try_init().ok();
}
