//! Live adapter for the `HttpTransport` port using a blocking reqwest client.

use std::sync::Mutex;

use reqwest::blocking::Client;

use crate::ports::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// Live transport holding one persistent HTTP session.
///
/// The session keeps server-issued cookies for the life of the process and
/// applies basic-auth credentials to every request once `set_basic_auth`
/// has been called.
pub struct LiveHttpTransport {
    client: Client,
    credentials: Mutex<Option<(String, String)>>,
}

impl LiveHttpTransport {
    /// Creates a new transport with a cookie-bearing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, credentials: Mutex::new(None) })
    }
}

impl HttpTransport for LiveHttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let credentials = self
            .credentials
            .lock()
            .map_err(|_| TransportError("credential lock poisoned".to_string()))?;
        if let Some((username, password)) = credentials.as_ref() {
            builder = builder.basic_auth(username, Some(password));
        }
        drop(credentials);

        let response = builder.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }

    fn set_basic_auth(&self, username: &str, password: &str) {
        if let Ok(mut credentials) = self.credentials.lock() {
            *credentials = Some((username.to_string(), password.to_string()));
        }
    }

    fn clear_basic_auth(&self) {
        if let Ok(mut credentials) = self.credentials.lock() {
            *credentials = None;
        }
    }
}
