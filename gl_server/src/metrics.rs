//! Prometheus metrics for monitoring lobby auth health.
//!
//! The exporter is optional; when `METRICS_BIND` is configured, metrics are
//! exposed in Prometheus text format at `http://<addr>/metrics`.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter on the given address.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Record an authorization attempt.
///
/// `outcome` is one of `ok`, `unauthorized`, or `error`.
pub fn authorize_attempt(outcome: &'static str) {
    metrics::counter!("lobby_authorize_attempts_total", "outcome" => outcome).increment(1);
}

/// Record a Steam ticket login attempt.
pub fn steam_login_attempt(outcome: &'static str) {
    metrics::counter!("lobby_steam_login_attempts_total", "outcome" => outcome).increment(1);
}

/// Record a user account created through external sign-in.
pub fn user_created(provider: &str) {
    metrics::counter!("lobby_users_created_total", "provider" => provider.to_string())
        .increment(1);
}
