//! In-memory [`DocumentStore`] backend.
//!
//! Backs tests and offline demos; behaves like the hosted store for the query
//! surface the gym app actually uses (equality filters, order-by, limit).

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{Direction, Document, DocumentStore, Query};
use crate::error::Error;

/// In-memory document store
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn merge_objects(target: &mut Value, patch: &Value) {
        if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    fn field_text(doc: &Value, field: &str) -> String {
        match doc.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Error> {
        let collections = self.collections.read().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error> {
        let mut collections = self.collections.write().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(existing) => Self::merge_objects(existing, fields),
            None => {
                docs.insert(id.to_string(), fields.clone());
            }
        }
        Ok(())
    }

    async fn add(&self, collection: &str, fields: &Value) -> Result<String, Error> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut collections = self.collections.write().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), Error> {
        let mut collections = self.collections.write().unwrap();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| Error::store(format!("unknown collection: {}", collection)))?;
        match docs.get_mut(id) {
            Some(existing) => {
                Self::merge_objects(existing, fields);
                Ok(())
            }
            None => Err(Error::store(format!("document not found: {}", id))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        let mut collections = self.collections.write().unwrap();
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, Error> {
        let collections = self.collections.read().unwrap();
        let mut matches: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| {
                        query
                            .filters()
                            .iter()
                            .all(|(field, value)| &Self::field_text(fields, field) == value)
                    })
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = query.order_by() {
            matches.sort_by(|a, b| {
                let ord = Self::field_text(&a.fields, field).cmp(&Self::field_text(&b.fields, field));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.row_limit() {
            matches.truncate(limit as usize);
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_get_merge_delete() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let id = store
                .add("members", &json!({"name": "Ada", "email": "ada@x.com"}))
                .await
                .unwrap();

            store
                .set_merge("members", &id, &json!({"phone": "123"}))
                .await
                .unwrap();

            let doc = store.get("members", &id).await.unwrap().unwrap();
            assert_eq!(doc.fields["name"], "Ada");
            assert_eq!(doc.fields["phone"], "123");

            store.delete("members", &id).await.unwrap();
            assert!(store.get("members", &id).await.unwrap().is_none());
        });
    }

    #[test]
    fn query_filters_orders_and_limits() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            for (name, paid) in [("b", false), ("a", false), ("c", true)] {
                store
                    .add("bills", &json!({"member_name": name, "paid": paid}))
                    .await
                    .unwrap();
            }

            let unpaid = store
                .query(
                    "bills",
                    &Query::new()
                        .eq("paid", false)
                        .order("member_name", Direction::Ascending)
                        .limit(10),
                )
                .await
                .unwrap();

            let names: Vec<_> = unpaid
                .iter()
                .map(|d| d.fields["member_name"].as_str().unwrap().to_string())
                .collect();
            assert_eq!(names, vec!["a", "b"]);
        });
    }
}
