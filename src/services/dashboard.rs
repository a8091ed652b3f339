//! Role dashboards: the data each view loads on entry.
//!
//! The admin dashboard fans out five independent collection loads and joins
//! them; the first failure cancels the batch and becomes the operation error.

use tokio::try_join;

use crate::error::Error;
use crate::models::{Bill, DietPlan, MemberProfile, Notification, Supplement};
use crate::services::{bills, diets, members, notifications, supplements};
use crate::store::DocumentStore;

/// Everything the admin view shows
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub members: Vec<MemberProfile>,
    pub bills: Vec<Bill>,
    pub notifications: Vec<Notification>,
    pub supplements: Vec<Supplement>,
    pub diets: Vec<DietPlan>,
}

/// Everything the member view shows. `profile` is `None` when no member
/// record is linked to the signed-in email yet.
#[derive(Debug, Clone)]
pub struct MemberDashboard {
    pub profile: Option<MemberProfile>,
    pub bills: Vec<Bill>,
    pub notifications: Vec<Notification>,
}

/// Load the admin dashboard: five concurrent collection reads, joined
pub async fn load_admin_dashboard<S>(store: &S) -> Result<AdminDashboard, Error>
where
    S: DocumentStore + ?Sized,
{
    let (members, bills, notifications, supplements, diets) = try_join!(
        members::list_members(store),
        bills::list_recent_bills(store),
        notifications::list_recent_notifications(store),
        supplements::list_supplements(store),
        diets::list_diet_plans(store),
    )?;
    Ok(AdminDashboard {
        members,
        bills,
        notifications,
        supplements,
        diets,
    })
}

/// Load the member dashboard for the signed-in email.
///
/// The member profile is looked up by email, first match wins. Without a
/// profile the dashboard is empty; the member exists as an account but the
/// gym has not registered them yet.
pub async fn load_member_dashboard<S>(store: &S, email: &str) -> Result<MemberDashboard, Error>
where
    S: DocumentStore + ?Sized,
{
    let profile = members::find_member_by_email(store, email).await?;
    log::info!(
        "member_profile_loaded email={} found={}",
        email,
        profile.is_some()
    );

    let Some(profile) = profile else {
        return Ok(MemberDashboard {
            profile: None,
            bills: Vec::new(),
            notifications: Vec::new(),
        });
    };

    let (bills, notifications) = try_join!(
        bills::bills_for_member(store, &profile.id),
        notifications::notifications_for_member(store, &profile.id),
    )?;
    Ok(MemberDashboard {
        profile: Some(profile),
        bills,
        notifications,
    })
}
