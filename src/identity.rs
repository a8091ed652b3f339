//! Identity-provider boundary: the [`IdentityProvider`] seam plus the REST
//! client that implements it.
//!
//! The provider owns account lifecycle (sign up, sign in, sign out) and feeds
//! auth-state changes to the session controller. The REST client also exposes
//! a watch channel that fires once at startup and on every login/logout,
//! mirroring the hosted SDK's auth-state callback.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::models::Identity;

/// Asynchronous identity-provider interface
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account and return its identity
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, Error>;

    /// Check credentials and return the signed-in identity
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, Error>;

    /// End the current session on the provider side
    async fn sign_out(&self) -> Result<(), Error>;
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    user: AuthUser,
}

struct ProviderSession {
    token: Option<String>,
    identity: Identity,
}

/// REST client for the hosted identity provider
pub struct RestIdentityClient {
    /// The base URL for the backend project
    url: String,
    /// The anonymous API key for the backend project
    key: String,
    /// HTTP client used for requests
    client: Client,
    /// The current provider session
    session: Arc<Mutex<Option<ProviderSession>>>,
    /// Auth-state feed; holds the current identity, `None` when signed out
    state_tx: watch::Sender<Option<Identity>>,
    /// Client options
    options: ClientOptions,
}

impl RestIdentityClient {
    /// Create a new identity client
    pub fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            state_tx,
            options,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{}{}", self.url, self.options.auth_path, path)
    }

    /// Subscribe to auth-state changes. The receiver immediately observes the
    /// current state, then every sign-in and sign-out.
    pub fn on_auth_state_change(&self) -> watch::Receiver<Option<Identity>> {
        self.state_tx.subscribe()
    }

    /// Get the identity of the currently signed-in user, if any
    pub fn current_identity(&self) -> Option<Identity> {
        let session = self.session.lock().unwrap();
        session.as_ref().map(|s| s.identity.clone())
    }

    fn store_session(&self, response: AuthResponse) -> Identity {
        let identity = Identity {
            uid: response.user.id,
            email: response.user.email,
        };
        {
            let mut session = self.session.lock().unwrap();
            *session = Some(ProviderSession {
                token: response.access_token,
                identity: identity.clone(),
            });
        }
        // Receivers may come and go; a lagging or absent receiver is fine.
        let _ = self.state_tx.send(Some(identity.clone()));
        identity
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let url = self.auth_url("/signup");
        log::info!("auth_sign_up_attempt email={}", email);

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let response = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_as(Error::auth)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        let identity = self.store_session(response);
        log::info!("auth_sign_up_success email={} uid={}", email, identity.uid);
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let url = self.auth_url("/token?grant_type=password");
        log::info!("auth_sign_in_attempt email={}", email);

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let response = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_as(Error::auth)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        let identity = self.store_session(response);
        log::info!("auth_sign_in_success email={} uid={}", email, identity.uid);
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), Error> {
        let url = self.auth_url("/logout");
        log::info!("auth_sign_out");

        let token = {
            let session = self.session.lock().unwrap();
            match session.as_ref() {
                Some(s) => s.token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let mut request = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_as(Error::auth);
        if let Some(token) = token {
            request = request.bearer_auth(&token);
        }
        request.execute_empty().await?;

        {
            let mut session = self.session.lock().unwrap();
            *session = None;
        }
        let _ = self.state_tx.send(None);

        Ok(())
    }
}
