//! Gymdesk Client Core
//!
//! The client core of a gym-management app backed by a hosted auth and
//! document-database service: session/role control, billing domain rules,
//! and the data services behind the admin, member, and public views.
//! Rendering and transport-level access control stay outside this crate.

pub mod billing;
pub mod config;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

use reqwest::Client;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::identity::RestIdentityClient;
use crate::session::SessionController;
use crate::store::RestStoreClient;

/// The main entry point for the gymdesk client
pub struct GymClient {
    /// The base URL for the backend project
    pub url: String,
    /// The anonymous API key for the backend project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Identity-provider client
    identity: Arc<RestIdentityClient>,
    /// Document-store client
    store: Arc<RestStoreClient>,
    /// Client options
    pub options: ClientOptions,
}

impl GymClient {
    /// Create a new client with default options
    pub fn new(url: &str, key: &str) -> Result<Self, Error> {
        Self::new_with_options(url, key, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let identity = Arc::new(RestIdentityClient::new(
            url,
            key,
            http_client.clone(),
            options.clone(),
        ));
        let store = Arc::new(RestStoreClient::new(
            url,
            key,
            http_client.clone(),
            options.clone(),
        ));

        Ok(Self {
            url: url.to_string(),
            key: key.to_string(),
            http_client,
            identity,
            store,
            options,
        })
    }

    /// Get the identity-provider client
    pub fn auth(&self) -> &RestIdentityClient {
        &self.identity
    }

    /// Get the document-store client
    pub fn store(&self) -> &RestStoreClient {
        &self.store
    }

    /// Create a session controller bound to this client's backends
    pub fn controller(&self) -> SessionController<RestIdentityClient, RestStoreClient> {
        SessionController::new(self.identity.clone(), self.store.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::session::{Role, SessionController, View};
    pub use crate::GymClient;
}
