//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `default_level` (for example `"info"`)
/// is used as the filter.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level.to_string());
    // A second initialization (tests, embedding hosts) keeps the first logger.
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
