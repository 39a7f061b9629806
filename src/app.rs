// Application wiring
// Starts the status endpoint and, when enabled, the dashboard next to it

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::logger;
use crate::server::{signal, RunningServer, Server, Site};

pub struct App {
    status: RunningServer,
    dashboard: Option<RunningServer>,
}

impl App {
    /// Bind and start both listeners. The dashboard fetches from
    /// `dashboard.status_url`, or from the status listener actually bound.
    pub fn start(config: &Config) -> Result<Self> {
        let status = Server::bind(config.get_socket_addr()?, Site::Status, config.logging.clone())?;
        let status_addr = status.local_addr()?;

        let dashboard = if config.dashboard.enabled {
            let site = Site::Dashboard(Arc::new(Dashboard::new(
                config.dashboard.title.clone(),
                config.status_url(status_addr),
            )?));
            Some(Server::bind(
                config.get_dashboard_socket_addr()?,
                site,
                config.logging.clone(),
            )?)
        } else {
            None
        };

        let dashboard_addr = dashboard.as_ref().map(Server::local_addr).transpose()?;
        logger::log_server_start(&status_addr, dashboard_addr.as_ref(), config);

        Ok(Self {
            status: status.start()?,
            dashboard: dashboard.map(Server::start).transpose()?,
        })
    }

    pub const fn status_addr(&self) -> SocketAddr {
        self.status.local_addr()
    }

    pub fn dashboard_addr(&self) -> Option<SocketAddr> {
        self.dashboard.as_ref().map(RunningServer::local_addr)
    }

    pub async fn stop(self) -> Result<()> {
        if let Some(dashboard) = self.dashboard {
            dashboard.stop().await?;
        }
        self.status.stop().await
    }
}

/// Start everything and run until SIGINT/SIGTERM
pub async fn run(config: Config) -> Result<()> {
    let app = App::start(&config)?;
    let signal = signal::wait_for_shutdown().await?;
    logger::log_shutdown_requested(signal);
    app.stop().await
}
