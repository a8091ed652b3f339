//! Domain records for the gym-management core.
//!
//! All records that come back from the document store are schema-on-read:
//! every field carries `#[serde(default)]` so that documents written by older
//! app versions (or by hand) deserialize with missing fields as empty values.

use serde::{Deserialize, Serialize};

/// Principal issued by the external identity provider.
///
/// The core only observes identities; it never constructs or destroys them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned stable unique identifier
    pub uid: String,
    /// Email address the account was registered with
    pub email: String,
}

/// Profile-store record in the `users` collection, keyed by provider uid.
///
/// Upserted (set-with-merge) on every login and signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Gym-domain member record, distinct from [`Identity`] and linked to it by
/// email address (first match wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub package_id: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub package_price: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A bill issued to a member. Immutable after creation; overdue status is
/// always derived from `due_date`, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub member_id: String,
    /// Member name snapshot taken at creation time
    #[serde(default)]
    pub member_name: String,
    /// Decimal amount formatted to two digits at creation
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Kind tag for a [`Notification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BillCreated,
    MonthlyFee,
    OverdueReminder,
    /// Kind written by another app version; carried through unmodified reads
    #[default]
    #[serde(other)]
    Unknown,
}

/// A notification addressed to a member. Write-only from the core's
/// perspective: created as a side effect of billing actions, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Month tag, only set for monthly fee reminders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

/// A supplement offered by the gym shop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Supplement {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: String,
}

/// A diet plan, either linked to one member or general (`member_id` absent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietPlan {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub created_at: String,
}

/// A fee package from the fixed catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeePackage {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}
