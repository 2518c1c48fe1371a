use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging with an env-filter.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies to this crate.
/// Safe to call more than once — later calls are no-ops.
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_filter))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
