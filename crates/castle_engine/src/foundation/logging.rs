//! Logging utilities and structured logging support
//!
//! The library only emits through the `log` facade. Binaries pick the sink;
//! these helpers install `env_logger` the way the demo application expects.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level filter.
///
/// `RUST_LOG` still overrides `default_level` when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
