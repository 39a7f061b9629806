// Status endpoint
// Answers `GET /` with a fixed greeting

use hyper::{Method, Request, StatusCode};
use serde::{Deserialize, Serialize};

use crate::http::{self, HttpResponse};

/// Greeting returned on every request
pub const GREETING: &str = "Willkommen bei Nick Backend!";

/// The only route of the status endpoint
pub const STATUS_PATH: &str = "/";

/// Body of the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// The fixed status payload; built fresh for each request
pub fn status_response() -> StatusResponse {
    StatusResponse {
        message: GREETING.to_string(),
    }
}

/// Status endpoint request handler
pub fn handle<B>(req: &Request<B>) -> HttpResponse {
    let is_head = req.method() == Method::HEAD;

    if let Some(resp) = http::check_http_method(req.method()) {
        return resp;
    }

    if req.uri().path() != STATUS_PATH {
        return http::build_404_response(is_head);
    }

    http::json_response(StatusCode::OK, &status_response(), is_head)
}
