//! Generic HTTP health probe.
//!
//! Stands in for the product-specific clients: one GET against the service
//! URL, classified by status code.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use dashbrr_core::{
    Error, HealthProbe, HealthProbes, HealthReport, HealthStatus, Result, ServiceType,
};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

const VERSION_HEADER: &str = "X-Application-Version";
const USER_AGENT: &str = concat!("dashbrr/", env!("CARGO_PKG_VERSION"));

/// Probe setup failures
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<ProbeError> for Error {
    fn from(err: ProbeError) -> Self {
        Self::probe_error(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct VersionBody {
    version: Option<String>,
}

/// Probe for one service type; the type decides which header carries the key.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: Client,
    api_key_header: &'static str,
}

impl HttpHealthProbe {
    pub const fn new(client: Client, api_key_header: &'static str) -> Self {
        Self {
            client,
            api_key_header,
        }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check_health(&self, url: &str, api_key: Option<&str>) -> Result<HealthReport> {
        let mut request = self.client.get(url);
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            request = if self.api_key_header.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                request.bearer_auth(key)
            } else {
                request.header(self.api_key_header, key)
            };
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, error = %e, "health probe could not reach service");
                return Ok(HealthReport::new(
                    HealthStatus::Offline,
                    format!("Service unreachable: {e}"),
                ));
            }
        };

        let status = response.status();
        let header_version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let version = if status.is_success() {
            let body = response.text().await.unwrap_or_default();
            version_from_body(&body).or(header_version)
        } else {
            header_version
        };

        let report = classify(status, version);
        if report.status.is_online() {
            debug!(url, %status, "health probe succeeded");
        } else {
            warn!(url, %status, status_text = %report.status, "health probe reported a problem");
        }
        Ok(report)
    }
}

fn version_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<VersionBody>(body)
        .ok()
        .and_then(|parsed| parsed.version)
        .filter(|version| !version.is_empty())
}

/// Map an HTTP status to a report.
pub fn classify(status: StatusCode, version: Option<String>) -> HealthReport {
    let report = match status.as_u16() {
        200..=299 => HealthReport::new(HealthStatus::Online, "Healthy"),
        401 | 403 => HealthReport::new(HealthStatus::Error, "invalid API key"),
        500..=599 => HealthReport::new(HealthStatus::Offline, format!("Server error: {status}")),
        _ => HealthReport::new(HealthStatus::Warning, format!("Unexpected response: {status}")),
    };

    match version {
        Some(version) => report.with_version(version),
        None => report,
    }
}

/// Hands out an [`HttpHealthProbe`] per service type sharing one client.
#[derive(Debug, Clone)]
pub struct HttpProbes {
    client: Client,
}

impl HttpProbes {
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(3))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { client })
    }
}

impl HealthProbes for HttpProbes {
    fn probe_for(&self, service_type: ServiceType) -> Arc<dyn HealthProbe> {
        Arc::new(HttpHealthProbe::new(
            self.client.clone(),
            service_type.api_key_header(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serve one canned HTTP response and hand back the URL plus the raw request.
    async fn serve_once(
        response: String,
    ) -> std::io::Result<(String, tokio::task::JoinHandle<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return String::new();
            };
            let mut buf = vec![0_u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        Ok((url, handle))
    }

    fn http_response(status_line: &str, headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n{headers}\r\n{body}",
            body.len()
        )
    }

    fn probe(header: &'static str) -> Result<HttpHealthProbe> {
        let probes = HttpProbes::new(Duration::from_secs(5))?;
        Ok(HttpHealthProbe::new(probes.client, header))
    }

    #[test]
    fn test_classify_status_codes() {
        assert_eq!(classify(StatusCode::OK, None).status, HealthStatus::Online);
        assert_eq!(classify(StatusCode::UNAUTHORIZED, None).status, HealthStatus::Error);
        assert_eq!(classify(StatusCode::FORBIDDEN, None).message, "invalid API key");
        assert_eq!(classify(StatusCode::BAD_GATEWAY, None).status, HealthStatus::Offline);
        assert_eq!(classify(StatusCode::NOT_FOUND, None).status, HealthStatus::Warning);
    }

    #[test]
    fn test_version_from_body() {
        assert_eq!(version_from_body(r#"{"version":"4.5.1"}"#), Some("4.5.1".to_string()));
        assert_eq!(version_from_body(r#"{"version":""}"#), None);
        assert_eq!(version_from_body("OK"), None);
    }

    #[tokio::test]
    async fn test_online_with_body_version_and_api_key() -> Result<()> {
        let (url, server) = serve_once(http_response(
            "200 OK",
            "Content-Type: application/json\r\n",
            r#"{"version":"1.44.0"}"#,
        ))
        .await?;

        let report = probe("X-Api-Key")?.check_health(&url, Some("secret")).await?;
        assert_eq!(report.status, HealthStatus::Online);
        assert_eq!(report.version, "1.44.0");

        let request = server.await.unwrap_or_default().to_ascii_lowercase();
        assert!(request.contains("x-api-key: secret"));
        Ok(())
    }

    #[tokio::test]
    async fn test_version_header_fallback() -> Result<()> {
        let (url, _server) =
            serve_once(http_response("200 OK", "X-Application-Version: 5.2.6\r\n", "pong")).await?;

        let report = probe("X-Api-Key")?.check_health(&url, None).await?;
        assert_eq!(report.version, "5.2.6");
        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_auth_for_authorization_header() -> Result<()> {
        let (url, server) = serve_once(http_response("401 Unauthorized", "", "")).await?;

        let report = probe("Authorization")?.check_health(&url, Some("tskey")).await?;
        assert_eq!(report.status, HealthStatus::Error);

        let request = server.await.unwrap_or_default().to_ascii_lowercase();
        assert!(request.contains("authorization: bearer tskey"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_is_offline() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        drop(listener);

        let report = probe("X-Api-Key")?.check_health(&url, None).await?;
        assert_eq!(report.status, HealthStatus::Offline);
        Ok(())
    }
}
