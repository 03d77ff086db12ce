// src/error.rs
// =============================================================================
// Typed failures for a single link check.
//
// A CheckError never escapes the checker: it is captured inside the
// CheckResult for its URL, and its Display text becomes the human-readable
// reason printed in the report.
//
// Application-level failures (bad configuration, missing root directory)
// use anyhow instead, see main.rs.
// =============================================================================

use std::error::Error as _;
use thiserror::Error;

/// Why a request could not produce an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The per-request timeout elapsed
    #[error("request timed out")]
    Timeout,
    /// The redirect limit was exceeded (usually a redirect loop)
    #[error("too many redirects")]
    TooManyRedirects,
    /// Hostname could not be resolved
    #[error("could not resolve hostname: {0}")]
    Dns(String),
    /// Connection refused, reset, or otherwise not established
    #[error("connection failed: {0}")]
    Connect(String),
    /// Certificate or handshake failure
    #[error("TLS error: {0}")]
    Tls(String),
    /// The URL could not be turned into a request at all
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for CheckError {
    // reqwest only exposes coarse flags (is_timeout, is_connect, ...).
    // DNS and TLS failures hide in the source chain, so we search the
    // flattened chain text for them.
    fn from(error: reqwest::Error) -> Self {
        let detail = error_chain(&error);
        let lowered = detail.to_lowercase();

        if error.is_timeout() {
            CheckError::Timeout
        } else if error.is_redirect() {
            CheckError::TooManyRedirects
        } else if error.is_builder() {
            CheckError::InvalidUrl(detail)
        } else if lowered.contains("dns") || lowered.contains("failed to lookup address") {
            CheckError::Dns(detail)
        } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
            CheckError::Tls(detail)
        } else if error.is_connect() {
            CheckError::Connect(detail)
        } else {
            CheckError::Other(detail)
        }
    }
}

// Joins an error and all of its sources into one line:
// "error sending request: error trying to connect: dns error: ..."
fn error_chain(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_reason_text() {
        assert_eq!(CheckError::Timeout.to_string(), "request timed out");
        assert_eq!(
            CheckError::Connect("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(CheckError::Other("boom".to_string()).to_string(), "boom");
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_url() {
        let client = reqwest::Client::new();
        let error = client.head("not a url").send().await.unwrap_err();
        assert!(matches!(CheckError::from(error), CheckError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let error = client
            .head(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();
        assert!(matches!(CheckError::from(error), CheckError::Connect(_)));
    }
}
