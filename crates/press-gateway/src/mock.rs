//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for exercising the gateway without a network.

use std::collections::HashMap;
use std::io;
use std::sync::RwLock;

use crate::error::GatewayError;
use crate::transport::{HttpResponse, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Unreachable,
}

impl Reply {
    fn to_result(&self, url: &str) -> Result<HttpResponse, GatewayError> {
        match self {
            Self::Respond(response) => Ok(response.clone()),
            Self::Unreachable => Err(GatewayError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection refused: {url}"),
            ))),
        }
    }
}

/// Mock transport for testing.
///
/// Serves canned responses keyed by exact URL and records every request in
/// order. Unknown URLs get a `404` unless [`MockTransport::unreachable`] is
/// used, in which case every unknown URL fails at the transport level.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use press_gateway::{ContentGateway, HttpResponse, MockTransport};
///
/// let mock = Arc::new(
///     MockTransport::new()
///         .with_json("https://cms.test/wp-json/wp/v2/pages", 200, serde_json::json!([])),
/// );
/// let gateway = ContentGateway::with_transport(&config, Arc::clone(&mock));
/// assert!(gateway.list_pages().is_empty());
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    routes: RwLock<HashMap<String, Reply>>,
    fallback: Reply,
    requests: RwLock<Vec<String>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            fallback: Reply::Respond(HttpResponse::new(404)),
            requests: RwLock::new(Vec::new()),
        }
    }
}

impl MockTransport {
    /// Create a mock answering `404` to every URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock where every unknown URL fails with a connection error.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            fallback: Reply::Unreachable,
            ..Self::default()
        }
    }

    /// Serve `response` for `url`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(url.into(), Reply::Respond(response));
        self
    }

    /// Serve a JSON body with the given status for `url`.
    #[must_use]
    pub fn with_json(self, url: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
        self.with_response(url, HttpResponse::json(status, &body))
    }

    /// Fail requests to `url` with a connection error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreachable(self, url: impl Into<String>) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(url.into(), Reply::Unreachable);
        self
    }

    /// URLs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, GatewayError> {
        self.requests.write().unwrap().push(url.to_owned());
        let routes = self.routes.read().unwrap();
        routes.get(url).unwrap_or(&self.fallback).to_result(url)
    }
}
