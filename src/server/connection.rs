// Connection handling module
// Serves a single TCP connection on its own task

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use hyper::body::{Body as _, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::site::Site;
use crate::config::LoggingConfig;
use crate::http::HttpResponse;
use crate::logger::{self, AccessLogEntry};

/// Accept a connection: count it, log it and hand it to a task in `connections`.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `site` - Application served on this listener
/// * `logging` - Access log settings
/// * `conn_counter` - Active connection counter, decremented when the task ends
/// * `shutdown` - Flips to `true` when the owning server stops
/// * `connections` - Tasks the accept loop drains on shutdown
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    site: &Site,
    logging: &Arc<LoggingConfig>,
    conn_counter: &Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
    connections: &mut JoinSet<()>,
) {
    conn_counter.fetch_add(1, Ordering::SeqCst);
    logger::log_connection_accepted(site.name(), &peer_addr);

    let site = site.clone();
    let logging = Arc::clone(logging);
    let conn_counter = Arc::clone(conn_counter);

    connections.spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let site = site.clone();
                let logging = Arc::clone(&logging);
                async move { Ok::<_, Infallible>(respond(&site, req, peer_addr, &logging).await) }
            }),
        );
        tokio::pin!(conn);

        // A stopped server finishes the in-flight request, then closes keep-alive connections
        let result = tokio::select! {
            result = conn.as_mut() => result,
            _ = async { shutdown.wait_for(|stopped| *stopped).await.is_ok() } => {
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        };

        if let Err(err) = result {
            logger::log_connection_error(&err);
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Dispatch one request to the site and write its access log line
async fn respond(
    site: &Site,
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    logging: &LoggingConfig,
) -> HttpResponse {
    let started = Instant::now();
    let mut entry = AccessLogEntry::from_request(&peer_addr, &req);

    // Neither site reads request bodies
    let (parts, _body) = req.into_parts();
    let req = Request::from_parts(parts, ());

    let response = site.respond(&req).await;

    if logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &logging.access_log_format);
    }

    response
}
