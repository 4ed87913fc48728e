//! HTTP client for the review backend

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::extract_error_message;
use std::time::Duration;

/// HTTP client for making requests to the review backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(method = "GET", path, "Sending request");
        let request = self.authorized(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(method = "POST", path, "Sending request");
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(method = "POST", path, "Sending request");
        let request = self.authorized(self.client.post(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Handle the HTTP response
    ///
    /// An empty success body decodes as JSON `null`.
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("Request failed");
            let message = extract_error_message(&text, fallback);
            tracing::warn!(path, status = status.as_u16(), %message, "Backend rejected request");
            return Err(ClientError::Api { status, message });
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!(path, error = %e, "Undecodable response body");
            ClientError::from(e)
        })
    }
}
