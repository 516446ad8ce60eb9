//! Structured logging configuration.
//!
//! Initializes tracing for the server; records emitted through the `log`
//! facade by the library crate are captured via the subscriber's log
//! bridge, so everything ends up in one stream.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var; by default the
/// noisier dependency targets are capped at `warn`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn,reqwest=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a failed or suspicious authorization attempt with structured data
///
/// # Arguments
///
/// * `event_type` - Type of security event (e.g. `invalid_token`)
/// * `remote` - Peer description when known
/// * `message` - Event message
pub fn log_security_event(event_type: &str, remote: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        remote = remote,
        "SECURITY: {}",
        message
    );
}
