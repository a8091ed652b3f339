//! Billing actions: bill creation (with its notification side effect),
//! listings, and CSV export

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::billing::{build_bills_csv, filter_bills_by_range};
use crate::error::Error;
use crate::models::Bill;
use crate::services::notifications;
use crate::store::{collections, into_models, Direction, DocumentStore, Query};

/// Create a bill for a member.
///
/// The member's name is denormalized into the bill as a snapshot, the amount
/// is fixed to two decimal digits, and a `bill_created` notification is
/// written as a side effect. Returns the stored bill.
pub async fn create_bill<S>(
    store: &S,
    member_id: &str,
    amount: f64,
    due_date: &str,
    paid: bool,
) -> Result<Bill, Error>
where
    S: DocumentStore + ?Sized,
{
    if member_id.is_empty() || due_date.is_empty() {
        return Err(Error::validation("member and due date are required"));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation("amount must be positive"));
    }

    let member_name = match store.get(collections::MEMBERS, member_id).await? {
        Some(doc) => doc
            .fields
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        None => String::new(),
    };

    let mut bill = Bill {
        id: String::new(),
        member_id: member_id.to_string(),
        member_name,
        amount: format!("{:.2}", amount),
        due_date: due_date.to_string(),
        paid,
        created_at: Utc::now().to_rfc3339(),
    };

    let payload = json!({
        "member_id": bill.member_id,
        "member_name": bill.member_name,
        "amount": bill.amount,
        "due_date": bill.due_date,
        "paid": bill.paid,
        "created_at": bill.created_at,
    });
    bill.id = store.add(collections::BILLS, &payload).await?;
    log::info!("bill_created id={} member_id={}", bill.id, bill.member_id);

    notifications::notify_bill_created(store, &bill).await?;
    Ok(bill)
}

/// List the most recent bills, newest first, capped at 100
pub async fn list_recent_bills<S>(store: &S) -> Result<Vec<Bill>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::BILLS,
            &Query::new()
                .order("created_at", Direction::Descending)
                .limit(100),
        )
        .await?;
    let bills: Vec<Bill> = into_models(docs)?;
    log::info!("bills_loaded count={}", bills.len());
    Ok(bills)
}

/// List one member's bills, newest first
pub async fn bills_for_member<S>(store: &S, member_id: &str) -> Result<Vec<Bill>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::BILLS,
            &Query::new()
                .eq("member_id", member_id)
                .order("created_at", Direction::Descending),
        )
        .await?;
    into_models(docs)
}

/// Build the CSV report for bills within an optional date range.
///
/// An empty selection is a validation error rather than an empty file, so the
/// caller can tell the user the range matched nothing.
pub fn export_bills_csv(
    bills: &[Bill],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<String, Error> {
    let selected = filter_bills_by_range(bills, from, to);
    if selected.is_empty() {
        return Err(Error::validation("no bills in this date range"));
    }
    log::info!("bills_csv_exported count={}", selected.len());
    Ok(build_bills_csv(&selected))
}
