//! Member management: CRUD, listing, search, and the fee-package catalog

use chrono::Utc;
use serde_json::json;

use crate::error::Error;
use crate::models::{FeePackage, MemberProfile};
use crate::store::{collections, into_models, Direction, DocumentStore, Query};

/// The fixed fee-package catalog, prices in rupees
pub const FEE_PACKAGES: [FeePackage; 6] = [
    FeePackage { id: "basic", name: "Basic Monthly", price: 1500 },
    FeePackage { id: "premium", name: "Premium Monthly", price: 2500 },
    FeePackage { id: "annual", name: "Annual Package", price: 15000 },
    FeePackage { id: "student", name: "Student Discount", price: 1200 },
    FeePackage { id: "family", name: "Family Package", price: 4000 },
    FeePackage { id: "personal_training", name: "Personal Training", price: 3500 },
];

/// Look up a fee package by id
pub fn find_package(id: &str) -> Option<&'static FeePackage> {
    FEE_PACKAGES.iter().find(|pkg| pkg.id == id)
}

/// Form input for creating or updating a member
#[derive(Debug, Clone, Default)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub package_id: String,
}

fn member_payload(input: &MemberInput) -> serde_json::Value {
    let package = find_package(&input.package_id);
    json!({
        "name": input.name,
        "email": input.email,
        "phone": input.phone,
        "package_id": input.package_id,
        "package_name": package.map(|p| p.name).unwrap_or(""),
        "package_price": package.map(|p| p.price).unwrap_or(0),
        "updated_at": Utc::now().to_rfc3339(),
    })
}

/// Create a member record, returning its new id
pub async fn create_member<S>(store: &S, input: &MemberInput) -> Result<String, Error>
where
    S: DocumentStore + ?Sized,
{
    if input.name.is_empty() || input.email.is_empty() {
        return Err(Error::validation("name and email are required"));
    }
    let mut payload = member_payload(input);
    payload["created_at"] = json!(Utc::now().to_rfc3339());
    let id = store.add(collections::MEMBERS, &payload).await?;
    log::info!("member_created id={}", id);
    Ok(id)
}

/// Update an existing member record
pub async fn update_member<S>(store: &S, id: &str, input: &MemberInput) -> Result<(), Error>
where
    S: DocumentStore + ?Sized,
{
    if input.name.is_empty() || input.email.is_empty() {
        return Err(Error::validation("name and email are required"));
    }
    store
        .update(collections::MEMBERS, id, &member_payload(input))
        .await?;
    log::info!("member_updated id={}", id);
    Ok(())
}

/// Delete a member record
pub async fn delete_member<S>(store: &S, id: &str) -> Result<(), Error>
where
    S: DocumentStore + ?Sized,
{
    store.delete(collections::MEMBERS, id).await?;
    log::warn!("member_deleted id={}", id);
    Ok(())
}

/// List all members, ordered by name
pub async fn list_members<S>(store: &S) -> Result<Vec<MemberProfile>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::MEMBERS,
            &Query::new().order("name", Direction::Ascending),
        )
        .await?;
    let members: Vec<MemberProfile> = into_models(docs)?;
    log::info!("members_loaded count={}", members.len());
    Ok(members)
}

/// Find the member record linked to an email address, first match wins
pub async fn find_member_by_email<S>(store: &S, email: &str) -> Result<Option<MemberProfile>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(collections::MEMBERS, &Query::new().eq("email", email).limit(1))
        .await?;
    docs.into_iter().next().map(|doc| doc.into_model()).transpose()
}

/// Filter an already-loaded member list by a case-insensitive name/email
/// substring. An empty term matches everything.
pub fn search_members(members: &[MemberProfile], term: &str) -> Vec<MemberProfile> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return members.to_vec();
    }
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&term) || m.email.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_catalog_lookup() {
        assert_eq!(find_package("annual").unwrap().price, 15000);
        assert!(find_package("gold").is_none());
    }

    #[test]
    fn search_matches_name_or_email_case_insensitive() {
        let members = vec![
            MemberProfile { name: "Ada Lovelace".into(), email: "ada@x.com".into(), ..Default::default() },
            MemberProfile { name: "Grace Hopper".into(), email: "grace@x.com".into(), ..Default::default() },
        ];
        assert_eq!(search_members(&members, "ADA").len(), 1);
        assert_eq!(search_members(&members, "grace@").len(), 1);
        assert_eq!(search_members(&members, "").len(), 2);
        assert!(search_members(&members, "nobody").is_empty());
    }
}
