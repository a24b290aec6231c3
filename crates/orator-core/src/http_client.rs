use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

/// HTTP client shared by the transcription, completion and speech providers
///
/// Built once at startup and cloned into each provider so they reuse one
/// connection pool.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
}
