//! HTTP client for the planner backend
//!
//! Thin wrapper over reqwest that builds URLs, maps status codes onto
//! `PlannerError` and decodes JSON bodies.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{PlannerError, Result};

const CLIENT_USER_AGENT: &str = concat!("ultraplan/", env!("CARGO_PKG_VERSION"));

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Planner backend REST client
#[derive(Debug, Clone)]
pub struct PlannerClient {
    client: Client,
    base_url: String,
    /// Per-request limit for JSON calls; uploads and streams only bound the connect
    timeout: Duration,
}

impl PlannerClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout for JSON requests.
    ///
    /// Connecting is bounded by the same limit. Uploads and chat streams
    /// have no total limit once connected, so a long reply is read to the end.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .connect_timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and return the raw response
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.build_url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        handle_response_status(response).await
    }

    /// GET a path and deserialize the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        parse_json(response).await
    }

    /// GET with query parameters and deserialize the JSON body
    pub async fn get_json_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.build_url(path);
        debug!(%url, "GET");
        let response = self.client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = handle_response_status(response).await?;
        parse_json(response).await
    }

    /// POST a JSON body and deserialize the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!(%url, "POST");
        let response = self.client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = handle_response_status(response).await?;
        parse_json(response).await
    }

    /// POST without a body and deserialize the JSON response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).timeout(self.timeout).send().await?;
        let response = handle_response_status(response).await?;
        parse_json(response).await
    }

    /// PUT a JSON body and deserialize the JSON response
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!(%url, "PUT");
        let response = self.client
            .put(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = handle_response_status(response).await?;
        parse_json(response).await
    }

    /// DELETE a path, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).timeout(self.timeout).send().await?;
        handle_response_status(response).await?;
        Ok(())
    }

    /// Upload a file as the multipart field `file`
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, file_path: &Path) -> Result<T> {
        let url = self.build_url(path);

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let file_bytes = tokio::fs::read(file_path).await?;
        debug!(%url, file = %file_name, bytes = file_bytes.len(), "POST multipart");

        let part = multipart::Part::bytes(file_bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = handle_response_status(response).await?;
        parse_json(response).await
    }

    /// POST a JSON body and stream the response bytes
    pub async fn post_stream<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        let url = self.build_url(path);
        debug!(%url, "POST (stream)");
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "text/event-stream")
            .json(body)
            .send()
            .await?;
        let response = handle_response_status(response).await?;
        Ok(response.bytes_stream().map_err(PlannerError::Http))
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        PlannerError::invalid_response(format!("Failed to parse JSON response: {}", e))
    })
}

/// Pull the `detail` message out of a FastAPI-style error body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        _ => body.trim().to_string(),
    }
}

/// Convert non-success status codes into errors
async fn handle_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_detail(&body);
    debug!(status = status.as_u16(), %message, "Request failed");

    match status {
        StatusCode::NOT_FOUND => Err(PlannerError::NotFound(if message.is_empty() {
            "Resource not found".to_string()
        } else {
            message
        })),
        _ => Err(PlannerError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = PlannerClient::new("http://localhost:8000/").unwrap();
        assert_eq!(
            client.build_url("/api/events/abc"),
            "http://localhost:8000/api/events/abc"
        );
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "Event not found"}"#), "Event not found");
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(error_detail(""), "");
    }
}
