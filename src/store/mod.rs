//! Document-store boundary: the [`DocumentStore`] seam, the REST client that
//! implements it, and an in-memory backend for tests and offline use.
//!
//! The store is schema-on-read: documents are free-form JSON objects and the
//! typed domain models apply their own defaults when converting.

mod memory;
mod query;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use memory::MemoryStore;
pub use query::{Direction, Query};

/// Collection names used by the gym app
pub mod collections {
    pub const USERS: &str = "users";
    pub const MEMBERS: &str = "members";
    pub const BILLS: &str = "bills";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const SUPPLEMENTS: &str = "supplements";
    pub const DIETS: &str = "diets";
}

/// A document returned from the store: its id plus its fields
#[derive(Debug, Clone)]
pub struct Document {
    /// Store-assigned document identifier
    pub id: String,
    /// The document body
    pub fields: Value,
}

impl Document {
    /// Convert the document into a typed model, injecting the document id
    /// into the model's `id` field when the body does not carry one.
    pub fn into_model<T: DeserializeOwned>(self) -> Result<T, Error> {
        let mut fields = self.fields;
        if let Value::Object(ref mut map) = fields {
            map.entry("id").or_insert(Value::String(self.id));
        }
        Ok(serde_json::from_value(fields)?)
    }
}

/// Asynchronous document-store interface.
///
/// Every operation may fail with [`Error::Store`]; callers decide whether a
/// failure propagates (the default) or degrades (role resolution only).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id, `None` if absent
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Error>;

    /// Create or merge fields into the document with the given id
    async fn set_merge(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error>;

    /// Add a new document, returning the store-assigned id
    async fn add(&self, collection: &str, fields: &Value) -> Result<String, Error>;

    /// Replace fields on an existing document
    async fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error>;

    /// Delete a document by id
    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error>;

    /// Run a query against a collection
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error>;
}

/// Convert a batch of documents into typed models
pub fn into_models<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, Error> {
    docs.into_iter().map(Document::into_model).collect()
}

#[derive(serde::Deserialize)]
struct WireDocument {
    id: String,
    #[serde(default)]
    fields: Value,
}

#[derive(serde::Deserialize)]
struct AddResponse {
    id: String,
}

/// REST client for the hosted document store
pub struct RestStoreClient {
    /// The base URL for the backend project
    url: String,
    /// The anonymous API key for the backend project
    key: String,
    /// HTTP client used for requests
    client: Client,
    /// Client options
    options: ClientOptions,
}

impl RestStoreClient {
    /// Create a new store client
    pub fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            options,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}{}/{}", self.url, self.options.store_path, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }
}

#[async_trait]
impl DocumentStore for RestStoreClient {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Error> {
        let doc = Fetch::get(&self.client, &self.document_url(collection, id))
            .header("apikey", &self.key)
            .error_as(Error::store)
            .execute_optional::<WireDocument>()
            .await?;
        Ok(doc.map(|d| Document {
            id: d.id,
            fields: d.fields,
        }))
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error> {
        let mut params = std::collections::HashMap::new();
        params.insert("merge".to_string(), "true".to_string());
        Fetch::patch(&self.client, &self.document_url(collection, id))
            .header("apikey", &self.key)
            .query(params)
            .error_as(Error::store)
            .json(fields)?
            .execute_empty()
            .await
    }

    async fn add(&self, collection: &str, fields: &Value) -> Result<String, Error> {
        let response = Fetch::post(&self.client, &self.collection_url(collection))
            .header("apikey", &self.key)
            .error_as(Error::store)
            .json(fields)?
            .execute::<AddResponse>()
            .await?;
        Ok(response.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error> {
        Fetch::patch(&self.client, &self.document_url(collection, id))
            .header("apikey", &self.key)
            .error_as(Error::store)
            .json(fields)?
            .execute_empty()
            .await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        Fetch::delete(&self.client, &self.document_url(collection, id))
            .header("apikey", &self.key)
            .error_as(Error::store)
            .execute_empty()
            .await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error> {
        let docs = Fetch::get(&self.client, &self.collection_url(collection))
            .header("apikey", &self.key)
            .query(query.to_params())
            .error_as(Error::store)
            .execute::<Vec<WireDocument>>()
            .await?;
        Ok(docs
            .into_iter()
            .map(|d| Document {
                id: d.id,
                fields: d.fields,
            })
            .collect())
    }
}
