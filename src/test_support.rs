// src/test_support.rs
// =============================================================================
// Helpers shared by the async tests: a throwaway axum server on a random
// local port, and checker settings that suit it.
// =============================================================================

use crate::config::CheckerConfig;
use axum::Router;
use std::time::Duration;

/// Serves `app` on 127.0.0.1 and returns "http://127.0.0.1:PORT".
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn test_checker_config(base_url: &str) -> CheckerConfig {
    CheckerConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..CheckerConfig::default()
    }
}
