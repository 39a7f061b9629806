// Server module entry
// Explicitly owned servers with a bind -> start -> stop lifecycle

pub mod connection;
pub mod listener;
pub mod signal;
pub mod site;

// Rust does not allow `loop` as a module name (keyword), hence server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::LoggingConfig;
use crate::error::Result;
use crate::logger;

// Re-export commonly used types
pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
pub use site::Site;

/// A bound but not yet accepting server
pub struct Server {
    listener: TcpListener,
    site: Site,
    logging: Arc<LoggingConfig>,
}

impl Server {
    /// Bind the listener. Must run inside a tokio runtime.
    pub fn bind(addr: SocketAddr, site: Site, logging: LoggingConfig) -> Result<Self> {
        let listener = create_reusable_listener(addr)?;
        Ok(Self {
            listener,
            site,
            logging: Arc::new(logging),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Spawn the accept loop
    pub fn start(self) -> Result<RunningServer> {
        let addr = self.local_addr()?;
        let (shutdown, stopped) = watch::channel(false);
        let active_connections = Arc::new(AtomicUsize::new(0));

        logger::log_listening(self.site.name(), &addr);

        let task = tokio::spawn(start_server_loop(
            self.listener,
            self.site,
            self.logging,
            Arc::clone(&active_connections),
            stopped,
        ));

        Ok(RunningServer {
            addr,
            shutdown,
            active_connections,
            task,
        })
    }
}

/// A server whose accept loop is running
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    active_connections: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl RunningServer {
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }

    /// Stop accepting, close open connections once their in-flight request
    /// is answered, and wait for all of it to finish
    pub async fn stop(self) -> Result<()> {
        self.shutdown.send_replace(true);
        self.task.await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging() -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
        }
    }

    #[tokio::test]
    async fn test_stop_releases_port() {
        let server = Server::bind("127.0.0.1:0".parse().unwrap(), Site::Status, logging()).unwrap();
        let running = server.start().unwrap();
        let addr = running.local_addr();
        running.stop().await.unwrap();

        // Listener is gone, so the address can be bound again
        let rebound = Server::bind(addr, Site::Status, logging()).unwrap();
        assert_eq!(rebound.local_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn test_stop_before_first_accept() {
        let server = Server::bind("127.0.0.1:0".parse().unwrap(), Site::Status, logging()).unwrap();
        let running = server.start().unwrap();
        assert_eq!(running.active_connections(), 0);
        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_closes_idle_keep_alive_connections() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let server = Server::bind("127.0.0.1:0".parse().unwrap(), Site::Status, logging()).unwrap();
        let running = server.start().unwrap();

        let mut stream = tokio::net::TcpStream::connect(running.local_addr()).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut buf = [0u8; 1024];
        let n = stream.read(&mut buf).await.unwrap();
        assert!(buf[..n].starts_with(b"HTTP/1.1 200 OK"));

        let limit = std::time::Duration::from_secs(5);
        tokio::time::timeout(limit, running.stop()).await.unwrap().unwrap();

        // The keep-alive connection reaches EOF instead of staying open
        let mut rest = Vec::new();
        assert!(tokio::time::timeout(limit, stream.read_to_end(&mut rest)).await.is_ok());
    }
}
