// piiguard/src/logger.rs
//! Logging setup for the piiguard binary and its tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` once. Later calls are ignored.
///
/// With `Some(level)` the level overrides `RUST_LOG`; with `None` the
/// environment decides, defaulting to `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.format_timestamp(None).try_init();
}
