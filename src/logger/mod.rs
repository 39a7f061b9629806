//! Logger module
//!
//! Provides logging utilities for both listeners including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Everything is emitted as `tracing` events; `init` installs the subscriber.

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Target used for access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the tracing subscriber with configuration
///
/// `RUST_LOG` takes precedence over `logging.level`. Calling this twice is
/// harmless; the first subscriber stays installed.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

pub fn log_server_start(
    status_addr: &SocketAddr,
    dashboard_addr: Option<&SocketAddr>,
    config: &Config,
) {
    info!("======================================");
    info!("Nick backend started successfully");
    info!("Status endpoint: http://{status_addr}/");
    match dashboard_addr {
        Some(addr) => info!("Dashboard: http://{addr}/"),
        None => info!("Dashboard: disabled"),
    }
    info!("Log level: {}", config.logging.level);
    info!(
        "Access log: {} ({})",
        if config.logging.access_log { "on" } else { "off" },
        config.logging.access_log_format
    );
    info!("======================================");
}

pub fn log_listening(site: &str, addr: &SocketAddr) {
    info!(site, "Listening on http://{addr}");
}

pub fn log_server_stopped(site: &str, addr: &SocketAddr, active_connections: usize) {
    info!(site, active_connections, "Stopped accepting on {addr}");
}

pub fn log_connection_accepted(site: &str, peer_addr: &SocketAddr) {
    debug!(site, "[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    error!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    warn!("[WARN] {message}");
}

pub fn log_status_fetch(url: &str, outcome: &str) {
    debug!(url, outcome, "Status fetch finished");
}

pub fn log_shutdown_requested(signal: &str) {
    info!("[SIGNAL] {signal} received, shutting down");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    info!(target: ACCESS_TARGET, "{}", entry.format(format));
}
