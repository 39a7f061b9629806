// Server loop module
// Accepts connections until the owning server is stopped

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::connection::accept_connection;
use super::site::Site;
use crate::config::LoggingConfig;
use crate::logger;

/// Accept loop shared by the status and dashboard listeners
///
/// Returns once `shutdown` flips to `true` (or its sender is dropped) and
/// every open connection has closed. The listener is dropped first, so no
/// new connections are accepted while the open ones drain.
pub async fn start_server_loop(
    listener: TcpListener,
    site: Site,
    logging: Arc<LoggingConfig>,
    active_connections: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &site,
                            &logging,
                            &active_connections,
                            shutdown.clone(),
                            &mut connections,
                        );
                    }
                    Err(e) => {
                        let message = format!("[{}] Failed to accept connection: {e}", site.name());
                        logger::log_error(&message);
                    }
                }
            }

            // Reap finished connection tasks
            Some(_) = connections.join_next(), if !connections.is_empty() => {}

            _ = async { shutdown.wait_for(|stopped| *stopped).await.is_ok() } => break,
        }
    }

    if let Ok(addr) = listener.local_addr() {
        logger::log_server_stopped(site.name(), &addr, active_connections.load(Ordering::SeqCst));
    }
    drop(listener);

    while connections.join_next().await.is_some() {}
}
