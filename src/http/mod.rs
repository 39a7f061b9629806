//! HTTP protocol layer module
//!
//! Response builders and method checks shared by the status endpoint and
//! the dashboard.

pub mod response;

use hyper::Method;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_html_response,
    json_response, HttpResponse,
};

/// Check HTTP method and return a 405 for anything but GET/HEAD
pub fn check_http_method(method: &Method) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => Some(build_405_response()),
    }
}
