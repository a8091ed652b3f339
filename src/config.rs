//! Configuration options for the gymdesk client

use std::time::Duration;

/// Configuration options for the gymdesk client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every backend call. External services
    /// otherwise hang the calling operation indefinitely, so this defaults on.
    pub request_timeout: Option<Duration>,

    /// The path prefix for the identity-provider endpoints
    pub auth_path: String,

    /// The path prefix for the document-store endpoints
    pub store_path: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            auth_path: "/auth/v1".to_string(),
            store_path: "/store/v1".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the identity-provider path prefix
    pub fn with_auth_path(mut self, value: &str) -> Self {
        self.auth_path = value.to_string();
        self
    }

    /// Set the document-store path prefix
    pub fn with_store_path(mut self, value: &str) -> Self {
        self.store_path = value.to_string();
        self
    }
}
