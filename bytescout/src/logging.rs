//! Tracing setup for binaries and tests embedding bytescout.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global fmt subscriber filtered at `level`.
///
/// `RUST_LOG` takes precedence over `level`; an unparsable `level` falls back
/// to `warn`. Returns false if a global subscriber was already installed, which
/// leaves the existing one in place.
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .is_ok()
}
