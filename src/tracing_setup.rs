//! Logging setup for hosts embedding the statistics engine
//!
//! The library only emits `tracing` events; nothing is printed unless the
//! host installs a subscriber. Hosts without their own subscriber (batch
//! reporting jobs, tests) can call [`init_tracing`].
//!
//! Configuration via environment variables:
//! - RUST_LOG: Log level filter (default: info), e.g. `abstats=debug`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a console subscriber filtered by `RUST_LOG`
///
/// Returns `false` when a global subscriber was already installed, which
/// makes repeated calls from test binaries harmless.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            "abstats tracing initialized"
        );
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init_is_idempotent() {
        let _ = init_tracing();
        // Second call must not panic even though a subscriber exists
        assert!(!init_tracing());
    }
}
