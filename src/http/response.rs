//! HTTP response building module
//!
//! Provides builders for the responses both listeners send, decoupled from
//! specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

pub type HttpResponse = Response<Full<Bytes>>;

/// Methods both listeners accept
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Build JSON response
///
/// `is_head` keeps the headers (including `Content-Length`) but drops the body.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T, is_head: bool) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => with_body(status, "application/json", json, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            with_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "application/json",
                br#"{"error":"Internal server error"}"#.to_vec(),
                is_head,
            )
        }
    }
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> HttpResponse {
    let mut response = with_body(
        StatusCode::OK,
        "text/html; charset=utf-8",
        content.into_bytes(),
        is_head,
    );
    response
        .headers_mut()
        .insert(CACHE_CONTROL, hyper::header::HeaderValue::from_static("no-cache"));
    response
}

/// 404 Not Found response
pub fn build_404_response(is_head: bool) -> HttpResponse {
    with_body(
        StatusCode::NOT_FOUND,
        "application/json",
        br#"{"error":"Not Found"}"#.to_vec(),
        is_head,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, "application/json")
        .header(ALLOW, ALLOWED_METHODS)
        .body(Full::new(Bytes::from_static(
            br#"{"error":"Method Not Allowed"}"#,
        )))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// 500 response for failures inside a handler, e.g. template rendering
pub fn build_500_response(is_head: bool) -> HttpResponse {
    with_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "text/plain; charset=utf-8",
        b"500 Internal Server Error".to_vec(),
        is_head,
    )
}

fn with_body(status: StatusCode, content_type: &str, data: Vec<u8>, is_head: bool) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
