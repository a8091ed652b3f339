//! Error handling for the gymdesk client

use std::fmt;
use thiserror::Error;

use crate::session::Role;

/// Unified error type for the gymdesk client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Identity-provider errors (bad credentials, weak password, duplicate account)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Document-store errors (network, permission, lookup failure)
    #[error("Store error: {0}")]
    Store(String),

    /// Client-side validation errors, raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// A navigation attempt was rejected by the role gate
    #[error("access to {view} requires role {required}")]
    AccessDenied {
        /// The view that was requested
        view: &'static str,
        /// The role the view requires
        required: Role,
    },

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new store error
    pub fn store<T: fmt::Display>(msg: T) -> Self {
        Error::Store(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
