//! API client for the randomuser.me record source.
//!
//! This module provides the `ApiClient` struct that issues the one GET
//! request per run and decodes the `results` array into `UserRecord`s.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Url};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{UserRecord, UsersResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Public endpoint of the generator service.
pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of users requested per page load.
pub const DEFAULT_RESULT_COUNT: u32 = 12;

/// Parameters of the single start-up fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub results: u32,
    /// Nationality codes (e.g. `us`, `gb`); empty means any
    pub nationalities: Vec<String>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            results: DEFAULT_RESULT_COUNT,
            nationalities: Vec::new(),
        }
    }
}

impl From<&Config> for FetchRequest {
    fn from(config: &Config) -> Self {
        Self {
            results: config.results,
            nationalities: config.nationalities.clone(),
        }
    }
}

/// API client for the record source.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client against the public endpoint with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_API_URL, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a client for the endpoint and timeout named in the config
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_endpoint(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_endpoint(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Build the request URL with `results` and the optional `nat` filter
    pub fn request_url(&self, request: &FetchRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("results", &request.results.to_string());
            if !request.nationalities.is_empty() {
                query.append_pair("nat", &request.nationalities.join(","));
            }
        }
        url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch one batch of generated users. Not retried on failure.
    pub async fn fetch_users(&self, request: &FetchRequest) -> Result<Vec<UserRecord>> {
        let url = self.request_url(request);
        debug!(%url, "Fetching users");

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let text = response
            .text()
            .await
            .context("Failed to read users response body")?;
        let users = parse_users(&text)?;

        info!(count = users.len(), "Users fetched");
        Ok(users)
    }
}

/// Decode a response body into its `results` records
pub fn parse_users(body: &str) -> Result<Vec<UserRecord>> {
    let parsed: UsersResponse = serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!(
            "{} (body starts with: {})",
            e,
            &body[..floor_char_boundary(body, 200)]
        ))
    })?;
    if let Some(seed) = parsed.info.as_ref().and_then(|info| info.seed.as_deref()) {
        debug!(seed, "Response seed");
    }
    Ok(parsed.results)
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn user_json(first: &str, last: &str) -> serde_json::Value {
        json!({
            "name": { "title": "Mr", "first": first, "last": last },
            "location": {
                "street": { "number": 7, "name": "Elm St" },
                "city": "Salem",
                "state": "OR",
                "postcode": 97301
            },
            "email": format!("{}@example.com", first),
            "dob": { "date": "1980-01-02T00:00:00.000Z", "age": 44 },
            "cell": "503-555-0100",
            "picture": {
                "medium": "https://randomuser.me/api/portraits/med/men/2.jpg",
                "thumbnail": "https://randomuser.me/api/portraits/thumb/men/2.jpg"
            }
        })
    }

    /// Serve one canned HTTP response and hand back the request line.
    async fn serve_once(status_line: &'static str, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}/api/", addr), handle)
    }

    /// Accept one connection and never answer it
    async fn serve_silently() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            std::future::pending::<()>().await;
        });
        format!("http://{}/api/", addr)
    }

    #[test]
    fn test_request_url_default() {
        let client = ApiClient::new().unwrap();
        let url = client.request_url(&FetchRequest::default());
        assert_eq!(url.as_str(), "https://randomuser.me/api/?results=12");
    }

    #[test]
    fn test_request_url_with_nationalities() {
        let client = ApiClient::new().unwrap();
        let request = FetchRequest {
            results: 5,
            nationalities: vec!["us".to_string(), "gb".to_string()],
        };
        let url = client.request_url(&request);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("results".to_string(), "5".to_string()),
                ("nat".to_string(), "us,gb".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(ApiClient::with_endpoint("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_parse_users_rejects_malformed_body() {
        let err = parse_users("<html>oops</html>").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_users_success() {
        let body = json!({ "results": [user_json("Ada", "Lovelace"), user_json("Alan", "Turing")] });
        let (url, server) = serve_once("200 OK", body.to_string()).await;

        let client = ApiClient::with_endpoint(&url, Duration::from_secs(5)).unwrap();
        let users = client.fetch_users(&FetchRequest::default()).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Ada Lovelace");
        assert_eq!(users[1].location.postcode, "97301");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/?results=12 "));
    }

    #[test]
    fn test_from_config_rejects_bad_api_url() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "USERGALLERY_API_URL").then(|| "not a url".to_string())
        });
        assert!(ApiClient::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_users_timeout_is_network_error() {
        let url = serve_silently().await;

        let client = ApiClient::with_endpoint(&url, Duration::from_millis(200)).unwrap();
        let err = client.fetch_users(&FetchRequest::default()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NetworkError(e)) if e.is_timeout()
        ));
        assert!(err.to_string().contains("Failed to send GET request"));
    }

    #[tokio::test]
    async fn test_fetch_users_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            ApiClient::with_endpoint(&format!("http://{}/api/", addr), Duration::from_secs(5)).unwrap();
        let err = client.fetch_users(&FetchRequest::default()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_users_server_error() {
        let (url, server) = serve_once("503 Service Unavailable", "busy".to_string()).await;

        let client = ApiClient::with_endpoint(&url, Duration::from_secs(5)).unwrap();
        let err = client.fetch_users(&FetchRequest::default()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::ServerError(body)) if body == "busy"
        ));
        server.await.unwrap();
    }
}
