//! Logging utilities

use env_logger::Env;

/// Initialize the logging system
///
/// Hosts call this once at startup. `RUST_LOG` takes precedence over
/// `default_filter` when set.
pub fn init(default_filter: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

/// Initialize logging if no logger is installed yet
///
/// Safe to call repeatedly, e.g. from every test that wants log output.
pub fn try_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
