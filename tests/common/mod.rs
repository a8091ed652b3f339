//! Shared test doubles: a scripted identity provider and an always-failing
//! document store.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

use gymdesk::error::Error;
use gymdesk::identity::IdentityProvider;
use gymdesk::models::Identity;
use gymdesk::store::{Document, DocumentStore, Query};

/// Identity provider with scripted outcomes and a network-call counter
#[derive(Default)]
pub struct FakeProvider {
    pub fail_sign_in: bool,
    pub fail_sign_up: bool,
    pub fail_sign_out: bool,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_sign_out() -> Self {
        Self {
            fail_sign_out: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn identity(email: &str) -> Identity {
        Identity {
            uid: format!("uid-{}", email),
            email: email.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<Identity, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_up {
            return Err(Error::auth("duplicate account"));
        }
        Ok(Self::identity(email))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Identity, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_in {
            return Err(Error::auth("bad credentials"));
        }
        Ok(Self::identity(email))
    }

    async fn sign_out(&self) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out {
            return Err(Error::auth("provider unreachable"));
        }
        Ok(())
    }
}

/// Document store that rejects every operation
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>, Error> {
        Err(Error::store("permission denied"))
    }

    async fn set_merge(&self, _collection: &str, _id: &str, _fields: &Value) -> Result<(), Error> {
        Err(Error::store("permission denied"))
    }

    async fn add(&self, _collection: &str, _fields: &Value) -> Result<String, Error> {
        Err(Error::store("permission denied"))
    }

    async fn update(&self, _collection: &str, _id: &str, _fields: &Value) -> Result<(), Error> {
        Err(Error::store("permission denied"))
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<(), Error> {
        Err(Error::store("permission denied"))
    }

    async fn query(&self, _collection: &str, _query: &Query) -> Result<Vec<Document>, Error> {
        Err(Error::store("permission denied"))
    }
}
