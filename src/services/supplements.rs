//! Supplement shop inventory

use chrono::Utc;
use serde_json::json;

use crate::error::Error;
use crate::models::Supplement;
use crate::store::{collections, into_models, Direction, DocumentStore, Query};

/// Add a supplement to the catalog, returning its new id
pub async fn create_supplement<S>(
    store: &S,
    name: &str,
    price: f64,
    description: &str,
    in_stock: bool,
) -> Result<String, Error>
where
    S: DocumentStore + ?Sized,
{
    if name.is_empty() {
        return Err(Error::validation("name and price are required"));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::validation("price must be positive"));
    }
    let payload = json!({
        "name": name,
        "price": format!("{:.2}", price),
        "description": description,
        "in_stock": in_stock,
        "created_at": Utc::now().to_rfc3339(),
    });
    let id = store.add(collections::SUPPLEMENTS, &payload).await?;
    log::info!("supplement_saved id={}", id);
    Ok(id)
}

/// List supplements, newest first
pub async fn list_supplements<S>(store: &S) -> Result<Vec<Supplement>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::SUPPLEMENTS,
            &Query::new().order("created_at", Direction::Descending),
        )
        .await?;
    into_models(docs)
}
