//! Diet plans, per-member or general

use chrono::Utc;
use serde_json::json;

use crate::error::Error;
use crate::models::DietPlan;
use crate::store::{collections, into_models, Direction, DocumentStore, Query};

/// Create a diet plan, returning its new id.
///
/// A plan without a member id is a general plan. When a member is given,
/// their name is denormalized into the plan for display.
pub async fn create_diet_plan<S>(
    store: &S,
    member_id: Option<&str>,
    title: &str,
    details: &str,
) -> Result<String, Error>
where
    S: DocumentStore + ?Sized,
{
    if title.is_empty() || details.is_empty() {
        return Err(Error::validation("title and details are required"));
    }

    let member_name = match member_id {
        Some(id) => store
            .get(collections::MEMBERS, id)
            .await?
            .and_then(|doc| doc.fields.get("name").and_then(|v| v.as_str()).map(String::from)),
        None => None,
    };

    let payload = json!({
        "member_id": member_id,
        "member_name": member_name,
        "title": title,
        "details": details,
        "created_at": Utc::now().to_rfc3339(),
    });
    let id = store.add(collections::DIETS, &payload).await?;
    log::info!("diet_saved id={}", id);
    Ok(id)
}

/// List diet plans, newest first
pub async fn list_diet_plans<S>(store: &S) -> Result<Vec<DietPlan>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::DIETS,
            &Query::new().order("created_at", Direction::Descending),
        )
        .await?;
    into_models(docs)
}
