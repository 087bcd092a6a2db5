//! HTTP transport port for the tracker REST API.

use thiserror::Error;

/// HTTP method of a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

/// A single request handed to the transport: method, absolute URL,
/// query-string pairs, and an optional JSON body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method to issue.
    pub method: Method,
    /// The absolute request URL, without query string.
    pub url: String,
    /// Query-string key/value pairs.
    pub query: Vec<(String, String)>,
    /// Optional JSON body, sent with a JSON content type.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a request with no query parameters and no body.
    #[must_use]
    pub fn new(method: Method, url: String) -> Self {
        Self { method, url, query: Vec::new(), body: None }
    }

    /// Appends a query-string pair.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the value of the first query pair named `key`, if any.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Raw reply from the transport: upstream status code plus body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

/// Failure below the HTTP layer (DNS, connection refused, timeout).
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Issues HTTP requests against the tracker.
///
/// Abstracting the transport lets the connector be exercised against a
/// scripted double without a live Jira instance.
pub trait HttpTransport: Send + Sync {
    /// Executes one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error when the request never produced an HTTP response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Stores credentials applied as basic auth to every subsequent request.
    fn set_basic_auth(&self, username: &str, password: &str);

    /// Drops any stored credentials.
    fn clear_basic_auth(&self);
}

#[cfg(test)]
mod tests {
    use super::{HttpRequest, Method};

    #[test]
    fn with_query_preserves_insertion_order() {
        let request = HttpRequest::new(Method::Get, "http://x".to_string())
            .with_query("a", "1")
            .with_query("b", "2");
        assert_eq!(request.query, vec![("a".into(), "1".into()), ("b".into(), "2".into())]);
    }

    #[test]
    fn query_value_returns_first_match() {
        let request = HttpRequest::new(Method::Get, "http://x".to_string())
            .with_query("k", "first")
            .with_query("k", "second");
        assert_eq!(request.query_value("k"), Some("first"));
        assert_eq!(request.query_value("missing"), None);
    }
}
