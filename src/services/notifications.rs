//! Notification dispatch and listings.
//!
//! Notifications are write-only from the core's perspective: billing actions
//! create them, dashboards list them, nothing here mutates or acknowledges
//! them.

use chrono::Utc;
use serde_json::json;

use crate::billing::is_overdue;
use crate::error::Error;
use crate::models::{Bill, Notification};
use crate::services::members;
use crate::store::{collections, into_models, Direction, DocumentStore, Query};

/// Write the notification that accompanies a freshly created bill
pub async fn notify_bill_created<S>(store: &S, bill: &Bill) -> Result<(), Error>
where
    S: DocumentStore + ?Sized,
{
    let payload = json!({
        "member_id": bill.member_id,
        "kind": "bill_created",
        "title": "New bill created",
        "message": format!(
            "A bill of ₹{} due on {} has been created.",
            bill.amount, bill.due_date
        ),
        "created_at": Utc::now().to_rfc3339(),
        "read": false,
    });
    store.add(collections::NOTIFICATIONS, &payload).await?;
    log::info!("notification_bill_created member_id={}", bill.member_id);
    Ok(())
}

/// Send one monthly-fee reminder per member, returning how many were created
pub async fn send_monthly_reminders<S>(store: &S, month: &str) -> Result<usize, Error>
where
    S: DocumentStore + ?Sized,
{
    if month.is_empty() {
        return Err(Error::validation("month is required"));
    }
    let member_list = members::list_members(store).await?;
    let mut created = 0;
    for member in &member_list {
        let payload = json!({
            "member_id": member.id,
            "kind": "monthly_fee",
            "title": format!("Monthly fee reminder - {}", month),
            "message": format!("Your monthly membership fee for {} is due soon.", month),
            "month": month,
            "created_at": Utc::now().to_rfc3339(),
            "read": false,
        });
        store.add(collections::NOTIFICATIONS, &payload).await?;
        created += 1;
    }
    log::info!("monthly_notifications_created month={} count={}", month, created);
    Ok(created)
}

/// Send an overdue reminder for every unpaid bill whose due date has passed,
/// returning how many were created
pub async fn send_overdue_reminders<S>(store: &S) -> Result<usize, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(collections::BILLS, &Query::new().eq("paid", false))
        .await?;
    let unpaid: Vec<Bill> = into_models(docs)?;
    let mut created = 0;
    for bill in unpaid.iter().filter(|b| is_overdue(&b.due_date)) {
        let payload = json!({
            "member_id": bill.member_id,
            "kind": "overdue_reminder",
            "title": "Overdue Payment Reminder",
            "message": format!(
                "Your bill of ₹{} due on {} is overdue. Please pay as soon as possible.",
                bill.amount, bill.due_date
            ),
            "created_at": Utc::now().to_rfc3339(),
            "read": false,
        });
        store.add(collections::NOTIFICATIONS, &payload).await?;
        created += 1;
    }
    log::info!("overdue_reminders_sent count={}", created);
    Ok(created)
}

/// List the most recent notifications, newest first, capped at 100
pub async fn list_recent_notifications<S>(store: &S) -> Result<Vec<Notification>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::NOTIFICATIONS,
            &Query::new()
                .order("created_at", Direction::Descending)
                .limit(100),
        )
        .await?;
    into_models(docs)
}

/// List one member's notifications, newest first
pub async fn notifications_for_member<S>(
    store: &S,
    member_id: &str,
) -> Result<Vec<Notification>, Error>
where
    S: DocumentStore + ?Sized,
{
    let docs = store
        .query(
            collections::NOTIFICATIONS,
            &Query::new()
                .eq("member_id", member_id)
                .order("created_at", Direction::Descending),
        )
        .await?;
    into_models(docs)
}
