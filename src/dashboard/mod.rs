// Dashboard UI module
// Renders the dashboard page, fetching the backend status once per page load

pub mod cards;
pub mod client;
mod render;

use hyper::{Method, Request};

use crate::error::Result;
use crate::http::{self, HttpResponse};
use crate::logger;

pub use client::{StatusClient, StatusOutcome, DEFAULT_MESSAGE, UNREACHABLE_MESSAGE};
pub use render::DashboardRenderer;

/// Paths that serve the dashboard page
pub const DASHBOARD_PATHS: [&str; 2] = ["/", "/dashboard"];

pub struct Dashboard {
    title: String,
    client: StatusClient,
    renderer: DashboardRenderer,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, status_url: impl Into<String>) -> Result<Self> {
        Self::with_renderer(title, status_url, DashboardRenderer::new()?)
    }

    pub fn with_renderer(
        title: impl Into<String>,
        status_url: impl Into<String>,
        renderer: DashboardRenderer,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            client: StatusClient::new(status_url)?,
            renderer,
        })
    }

    /// One page load: a single status fetch followed by a render
    pub async fn render_page(&self) -> std::result::Result<String, minijinja::Error> {
        let outcome = self.client.fetch().await;
        self.renderer.render(&self.title, &outcome)
    }

    /// Dashboard request handler
    pub async fn handle<B>(&self, req: &Request<B>) -> HttpResponse {
        let is_head = req.method() == Method::HEAD;

        if let Some(resp) = http::check_http_method(req.method()) {
            return resp;
        }

        if !DASHBOARD_PATHS.contains(&req.uri().path()) {
            return http::build_404_response(is_head);
        }

        match self.render_page().await {
            Ok(html) => http::build_html_response(html, is_head),
            Err(e) => {
                logger::log_error(&format!("Failed to render dashboard: {e}"));
                http::build_500_response(is_head)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    fn request(method: &str, path: &str) -> Request<()> {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_backend_still_renders() {
        let dashboard = Dashboard::new("Dashboard", closed_port_url()).unwrap();
        let response = dashboard.handle(&request("GET", "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(UNREACHABLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_dashboard_alias_path() {
        let dashboard = Dashboard::new("Dashboard", closed_port_url()).unwrap();
        let response = dashboard.handle(&request("GET", "/dashboard")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_and_method() {
        let dashboard = Dashboard::new("Dashboard", closed_port_url()).unwrap();
        assert_eq!(
            dashboard.handle(&request("GET", "/nope")).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            dashboard.handle(&request("DELETE", "/")).await.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[tokio::test]
    async fn test_render_failure_is_500() {
        let renderer = DashboardRenderer::with_template("{{ no_such_function() }}").unwrap();
        let dashboard = Dashboard::with_renderer("Dashboard", closed_port_url(), renderer).unwrap();
        let response = dashboard.handle(&request("GET", "/")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
