//! Billing domain rules.
//!
//! Pure, side-effect-free functions over [`Bill`] records: overdue
//! classification, derived status labels, CSV export, and the date-range
//! filter used by the report exporter. Nothing here touches the network; the
//! service and render layers call in.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::Bill;

/// CSV column order for bill exports. Fixed; the exporter never reorders.
pub const CSV_HEADERS: [&str; 7] = [
    "id",
    "memberId",
    "memberName",
    "amount",
    "dueDate",
    "paid",
    "createdAt",
];

/// Parse a calendar timestamp as used in stored documents: RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` (taken as midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Whether a due date lies strictly in the past at `now`.
///
/// Unparseable input means "not overdue", never an error; a bill due exactly
/// at `now` is not yet overdue.
pub fn is_overdue_at(due_date: &str, now: DateTime<Utc>) -> bool {
    match parse_timestamp(due_date) {
        Some(due) => now > due,
        None => false,
    }
}

/// [`is_overdue_at`] against the current time
pub fn is_overdue(due_date: &str) -> bool {
    is_overdue_at(due_date, Utc::now())
}

/// Derived payment status of a bill. Never stored; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Paid,
    Overdue,
    Pending,
}

impl BillStatus {
    /// Display label, as shown on the billing tables
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Paid => "Paid",
            BillStatus::Overdue => "Overdue",
            BillStatus::Pending => "Pending",
        }
    }
}

/// Classify a bill at a given instant
pub fn bill_status_at(bill: &Bill, now: DateTime<Utc>) -> BillStatus {
    if bill.paid {
        BillStatus::Paid
    } else if is_overdue_at(&bill.due_date, now) {
        BillStatus::Overdue
    } else {
        BillStatus::Pending
    }
}

fn csv_field(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}

/// Build CSV content for a list of bills.
///
/// Every field is double-quoted with embedded quotes doubled, whether or not
/// quoting is structurally necessary. An empty input produces the header line
/// alone, never an empty string.
pub fn build_bills_csv(bills: &[Bill]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    for bill in bills {
        let paid = if bill.paid { "true" } else { "false" };
        let row = [
            bill.id.as_str(),
            bill.member_id.as_str(),
            bill.member_name.as_str(),
            bill.amount.as_str(),
            bill.due_date.as_str(),
            paid,
            bill.created_at.as_str(),
        ]
        .map(csv_field)
        .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

/// Keep bills whose creation time (falling back to the due date) lies inside
/// the optional `from`/`to` bounds. Bills whose timestamps fail to parse are
/// kept, matching the exporter's lenient behavior.
pub fn filter_bills_by_range(
    bills: &[Bill],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Bill> {
    bills
        .iter()
        .filter(|bill| {
            let stamp = if bill.created_at.is_empty() {
                &bill.due_date
            } else {
                &bill.created_at
            };
            match parse_timestamp(stamp) {
                Some(created) => {
                    !from.is_some_and(|f| created < f) && !to.is_some_and(|t| created > t)
                }
                None => true,
            }
        })
        .cloned()
        .collect()
}
