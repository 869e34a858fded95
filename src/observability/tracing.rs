use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Install the global subscriber with the given default level.
///
/// `RUST_LOG` overrides the level. Returns false if a subscriber was
/// already installed, which leaves the existing one in place.
pub fn init_tracing(default_level: &str, json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .is_ok()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .try_init()
            .is_ok()
    }
}

/// Install the global subscriber from the `log_level` and `log_json` settings.
pub fn init_from_config(config: &Config) -> bool {
    init_tracing(&config.log_level, config.log_json)
}

/// Initialize tracing for tests (doesn't fail if already initialized).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sitedata=debug")
        .with_test_writer()
        .try_init();
}
