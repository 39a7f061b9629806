//! Status fetch
//!
//! One GET against the status endpoint per page load, folded into a
//! two-state [`StatusOutcome`]. Failures never escape as errors.

use hyper::body::Bytes;
use serde_json::Value;

use crate::error::Result;
use crate::logger;

/// Shown when the body parses but carries no usable `message`
pub const DEFAULT_MESSAGE: &str = "API online!";

/// Shown when the status endpoint cannot be reached or answers garbage
pub const UNREACHABLE_MESSAGE: &str = "Backend nicht erreichbar.";

/// Result of a single status fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The endpoint answered; holds its message or [`DEFAULT_MESSAGE`]
    Online(String),
    /// Network error, non-2xx status or malformed body
    Unreachable,
}

impl StatusOutcome {
    /// Interpret a 2xx response body
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return Self::Unreachable;
        };

        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MESSAGE);

        Self::Online(message.to_string())
    }

    /// Text the dashboard displays for this outcome
    pub fn display_text(&self) -> &str {
        match self {
            Self::Online(message) => message,
            Self::Unreachable => UNREACHABLE_MESSAGE,
        }
    }

    pub const fn is_online(&self) -> bool {
        matches!(self, Self::Online(_))
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Online(_) => "online",
            Self::Unreachable => "unreachable",
        }
    }
}

/// HTTP client bound to one status URL
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    url: String,
}

impl StatusClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().no_proxy().build()?,
            url: url.into(),
        })
    }

    /// Perform exactly one request; no retry
    pub async fn fetch(&self) -> StatusOutcome {
        let outcome = match self.fetch_body().await {
            Ok(body) => StatusOutcome::from_body(&body),
            Err(e) => {
                logger::log_warning(&format!("Status fetch from {} failed: {e}", self.url));
                StatusOutcome::Unreachable
            }
        };
        logger::log_status_fetch(&self.url, outcome.label());
        outcome
    }

    async fn fetch_body(&self) -> reqwest::Result<Bytes> {
        let response = self.http.get(&self.url).send().await?.error_for_status()?;
        response.bytes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_used() {
        assert_eq!(
            StatusOutcome::from_body(br#"{"message":"Hallo"}"#),
            StatusOutcome::Online("Hallo".to_string())
        );
    }

    #[test]
    fn test_missing_message_falls_back_to_default() {
        let outcome = StatusOutcome::from_body(br#"{"status":"ok"}"#);
        assert_eq!(outcome.display_text(), DEFAULT_MESSAGE);
        assert!(outcome.is_online());
    }

    #[test]
    fn test_non_string_or_empty_message_falls_back_to_default() {
        for body in [
            br#"{"message":null}"#.as_slice(),
            br#"{"message":42}"#.as_slice(),
            br#"{"message":""}"#.as_slice(),
            b"[]".as_slice(),
        ] {
            assert_eq!(
                StatusOutcome::from_body(body).display_text(),
                DEFAULT_MESSAGE
            );
        }
    }

    #[test]
    fn test_malformed_body_is_unreachable() {
        let outcome = StatusOutcome::from_body(b"<html>oops</html>");
        assert_eq!(outcome, StatusOutcome::Unreachable);
        assert_eq!(outcome.display_text(), UNREACHABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fetch_from_closed_port_is_unreachable() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = StatusClient::new(format!("http://{addr}/")).unwrap();
        assert_eq!(client.fetch().await, StatusOutcome::Unreachable);
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_unreachable() {
        let client = StatusClient::new("not a url").unwrap();
        assert_eq!(client.fetch().await, StatusOutcome::Unreachable);
    }
}
