//! Public record search: look up a member and their bills by email

use crate::error::Error;
use crate::models::{Bill, MemberProfile};
use crate::services::{bills, members};
use crate::store::DocumentStore;

/// A member together with their billing history
#[derive(Debug, Clone)]
pub struct MemberRecords {
    pub member: MemberProfile,
    pub bills: Vec<Bill>,
}

/// Find the member registered under an email address and their bills, newest
/// first. `None` when no member matches.
pub async fn search_records<S>(store: &S, email: &str) -> Result<Option<MemberRecords>, Error>
where
    S: DocumentStore + ?Sized,
{
    if email.is_empty() {
        return Err(Error::validation("email is required"));
    }
    let member = match members::find_member_by_email(store, email).await? {
        Some(member) => member,
        None => return Ok(None),
    };
    let bills = bills::bills_for_member(store, &member.id).await?;
    log::info!("records_searched email={} bills={}", email, bills.len());
    Ok(Some(MemberRecords { member, bills }))
}
