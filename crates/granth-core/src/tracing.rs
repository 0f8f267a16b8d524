//! Tracing subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `config.log_level`. Safe to call more than once; only
/// the first call installs anything. Returns whether this call (or an earlier
/// one) ended up owning the global subscriber.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.is_ok()
    })
}
