//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a fallback filter used when `RUST_LOG` is unset
///
/// Safe to call more than once; later calls are ignored, which lets tests
/// share it.
pub fn init_with_level(default_filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .is_test(cfg!(test))
    .try_init();
}
