//! OVH API client implementation
//!
//! This module provides the OvhClient that implements the ApiClient trait
//! using HTTP requests with the `X-Ovh-*` signature headers. The client
//! corrects for drift between the local clock and the API's clock by
//! fetching the server time once and reusing the measured delta for every
//! signed request.

use std::time::Duration;

use async_trait::async_trait;
use ovh_core::{ApiClient, ApiResponse, Credentials, Error, Method, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::signature;

/// Default request timeout, matching the vendor clients
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Header carrying the application key, sent on every request
const HEADER_APPLICATION: &str = "X-Ovh-Application";
/// Header carrying the drift-corrected unix timestamp
const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";
/// Header carrying the consumer key on authenticated requests
const HEADER_CONSUMER: &str = "X-Ovh-Consumer";
/// Header carrying the request signature
const HEADER_SIGNATURE: &str = "X-Ovh-Signature";

/// JSON media type with the charset the API expects
const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Signed client for OVH-compatible endpoints
pub struct OvhClient {
    http_client: Client,
    endpoint: String,
    application_key: String,
    application_secret: String,
    consumer_key: String,
    time_delta: OnceCell<i64>,
}

impl OvhClient {
    /// Create a new OvhClient from resolved credentials
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            endpoint: credentials.endpoint_url.trim_end_matches('/').to_string(),
            application_key: credentials.application_key.clone(),
            application_secret: credentials.application_secret.clone(),
            consumer_key: credentials.consumer_key.clone(),
            time_delta: OnceCell::new(),
        })
    }

    /// Build the full URL for an API path
    ///
    /// The path is concatenated verbatim, query string included; the caller
    /// supplies the leading slash.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Difference between the server clock and the local clock, in seconds
    ///
    /// Fetched from the unauthenticated `/auth/time` route at most once per
    /// client; every signed request reuses the cached value.
    pub async fn time_delta(&self) -> Result<i64> {
        self.time_delta
            .get_or_try_init(|| async {
                let url = self.url("/auth/time");
                let response = self
                    .http_client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| Error::Network(format!("Request failed: {e}")))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Auth(format!(
                        "Server time fetch failed with HTTP {}",
                        status.as_u16()
                    )));
                }

                let text = response
                    .text()
                    .await
                    .map_err(|e| Error::Network(format!("Failed to read response: {e}")))?;
                let server_time: i64 = text
                    .trim()
                    .parse()
                    .map_err(|_| Error::Auth(format!("Invalid server time response: {text:?}")))?;

                Ok(server_time - local_time())
            })
            .await
            .copied()
    }

    /// Build, sign, and send one request, draining the response into memory
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&serde_json::Value>,
        need_auth: bool,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        let body = match payload {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };

        let mut request_builder = self
            .http_client
            .request(into_reqwest_method(method), &url)
            .header(ACCEPT, "application/json")
            .header(HEADER_APPLICATION, &self.application_key);

        if payload.is_some() {
            request_builder = request_builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.clone());
        }

        if need_auth {
            let delta = self.time_delta().await?;
            let timestamp = local_time() + delta;
            let signature = signature::sign(
                &self.application_secret,
                &self.consumer_key,
                method.as_str(),
                &url,
                &body,
                timestamp,
            );
            request_builder = request_builder
                .header(HEADER_TIMESTAMP, timestamp.to_string())
                .header(HEADER_CONSUMER, &self.consumer_key)
                .header(HEADER_SIGNATURE, signature);
        }

        tracing::debug!(method = %method, url = %url, "dispatching request");

        let response = request_builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {e}")))?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// `GET path`, deserializing a 2xx response body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::Get, path, None, true).await?;
        decode(response)
    }

    /// `POST path` with a JSON payload, deserializing a 2xx response body
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T> {
        let response = self.request(Method::Post, path, Some(payload), true).await?;
        decode(response)
    }

    /// `PUT path` with a JSON payload, deserializing a 2xx response body
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T> {
        let response = self.request(Method::Put, path, Some(payload), true).await?;
        decode(response)
    }

    /// `DELETE path`, deserializing a 2xx response body
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::Delete, path, None, true).await?;
        decode(response)
    }
}

/// Seconds since the unix epoch on the local clock
fn local_time() -> i64 {
    jiff::Timestamp::now().as_second()
}

fn into_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Error body shape returned by the API on failures
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Deserialize a 2xx body; map anything else to an error
fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T> {
    if !response.is_success() {
        return Err(map_api_error(&response));
    }

    if response.body.is_empty() {
        // Routes with no response body deserialize as null
        serde_json::from_str("null").map_err(Error::Json)
    } else {
        serde_json::from_slice(&response.body).map_err(Error::Json)
    }
}

/// Map a non-2xx response to an error, extracting the API's message field
/// when the body carries one
fn map_api_error(response: &ApiResponse) -> Error {
    let body = String::from_utf8_lossy(&response.body);
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.into_owned());

    match response.status {
        401 | 403 => Error::Auth(message),
        status => Error::Api { status, message },
    }
}

#[async_trait]
impl ApiClient for OvhClient {
    async fn call_raw(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
        need_auth: bool,
    ) -> Result<ApiResponse> {
        self.request(method, path, payload.as_ref(), need_auth).await
    }
}
