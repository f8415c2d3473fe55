//! ApiClient trait definition
//!
//! This trait defines the interface for one authenticated request/response
//! exchange with the OVH API. It decouples the CLI dispatcher from the
//! concrete HTTP client so the dispatcher can be tested against a mock.

use async_trait::async_trait;

use crate::error::Result;

/// HTTP methods accepted by the dispatcher.
///
/// The OVH console only ever exposes these four verbs; anything else is a
/// usage error long before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Uppercase wire form, as used on the request line and in the signature
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete HTTP response, drained into memory.
///
/// The body is kept as raw bytes: the dispatcher's contract is to print it
/// verbatim, so no decoding happens on this side of the boundary.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers in arrival order
    pub headers: Vec<(String, String)>,

    /// Raw response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Whether the status code is in the 2xx success range
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// One request/response exchange with the remote API.
///
/// Implementations own credential handling, request signing, and transport.
/// Any HTTP status is a successful exchange; `Err` is reserved for transport
/// and signing failures.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send `method path` with an optional JSON payload and return the raw
    /// response. `need_auth` controls whether the signature headers are
    /// attached; the dispatcher always asks for an authenticated call.
    async fn call_raw(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
        need_auth: bool,
    ) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(format!("{}", Method::Delete), "DELETE");
    }

    #[test]
    fn test_response_success_range() {
        let resp = |status| ApiResponse {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(!resp(199).is_success());
        assert!(resp(200).is_success());
        assert!(resp(202).is_success());
        assert!(resp(299).is_success());
        assert!(!resp(300).is_success());
        assert!(!resp(404).is_success());
        assert!(!resp(500).is_success());
    }
}
