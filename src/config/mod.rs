// Configuration module entry point
// Layers defaults, an optional config file and the process environment

mod types;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::error::{AppError, Result};

// Re-export public types
pub use types::{Config, DashboardConfig, LoggingConfig, ServerConfig};

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PORT";

/// Prefix for all other environment overrides, e.g. `NICK_DASHBOARD__PORT`
pub const ENV_PREFIX: &str = "NICK";

/// Default status endpoint port when neither the file nor `PORT` set one
pub const DEFAULT_PORT: u16 = 5000;

impl Config {
    /// Load configuration from the real process environment
    pub fn load(config_path: &str) -> Result<Self> {
        let env: config::Map<String, String> = std::env::vars().collect();
        Self::load_from(config_path, &env)
    }

    /// Load configuration from specified file path (without extension)
    /// and the given environment snapshot
    pub fn load_from(config_path: &str, env: &config::Map<String, String>) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("dashboard.enabled", true)?
            .set_default("dashboard.host", "127.0.0.1")?
            .set_default("dashboard.port", 5173)?
            .set_default("dashboard.title", "Dashboard")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .set_override_option("server.port", env.get(PORT_ENV).cloned())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        parse_addr(&self.server.host, self.server.port)
    }

    pub fn get_dashboard_socket_addr(&self) -> Result<SocketAddr> {
        parse_addr(&self.dashboard.host, self.dashboard.port)
    }

    /// URL the dashboard fetches: `dashboard.status_url`, or the bound
    /// status listener when unset
    pub fn status_url(&self, status_addr: SocketAddr) -> String {
        match &self.dashboard.status_url {
            Some(url) => url.clone(),
            None => status_url_for(status_addr),
        }
    }
}

/// Status URL for a listener address; wildcard hosts are reached via loopback
fn status_url_for(mut addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        let loopback = match addr.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
        };
        addr.set_ip(loopback);
    }
    format!("http://{addr}/")
}

fn parse_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let addr = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    addr.parse().map_err(|source| AppError::Address { addr, source })
}
