//! Session and role control.
//!
//! A [`SessionController`] owns the process-local session (identity, role,
//! cached member profile), decides which view is active, and gates navigation
//! by role. Roles live in the `users` profile collection and are resolved
//! after every sign-in, sign-up, and auth-state event; resolution is
//! authoritative over whatever role the login form requested.
//!
//! Note on trust: the login and signup forms let a user self-declare a role,
//! and the profile upsert is last-write-wins, so a returning user can change
//! their own role by re-submitting the form. That matches the deployed
//! behavior; enforcement belongs to the backend's access-control rules, not
//! this client.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::identity::IdentityProvider;
use crate::models::{Identity, MemberProfile};
use crate::store::{collections, DocumentStore};

/// Access tier of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Member,
    Admin,
}

impl Role {
    /// The wire representation stored in the `users` collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role value; anything unrecognized is a guest
    pub fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            "member" => Role::Member,
            _ => Role::Guest,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The views of the single-page app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Admin,
    Member,
    Public,
}

impl View {
    /// The view's element identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Login => "login-view",
            View::Admin => "admin-view",
            View::Member => "member-view",
            View::Public => "public-view",
        }
    }

    /// The role a view requires, `None` for public views
    pub fn required_role(&self) -> Option<Role> {
        match self {
            View::Admin => Some(Role::Admin),
            View::Member => Some(Role::Member),
            View::Login | View::Public => None,
        }
    }
}

/// The landing view for a freshly resolved role
pub fn role_view(role: Role) -> View {
    match role {
        Role::Admin => View::Admin,
        Role::Member => View::Member,
        Role::Guest => View::Public,
    }
}

/// The set of views a role may navigate to. This single table is consulted
/// everywhere a view is gated.
pub fn visible_views(role: Role) -> &'static [View] {
    match role {
        Role::Guest => &[View::Login, View::Public],
        Role::Member => &[View::Member, View::Public],
        Role::Admin => &[View::Admin, View::Public],
    }
}

/// Process-local session state. Exactly one exists per controller.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The signed-in identity, `None` when signed out
    pub identity: Option<Identity>,
    /// The effective role, always `Guest` when signed out
    pub role: Role,
    /// Cached member profile, populated lazily by the member dashboard
    pub profile: Option<MemberProfile>,
}

/// Controller for the session/role state machine
pub struct SessionController<P, S> {
    provider: Arc<P>,
    store: Arc<S>,
    session: Session,
    active_view: View,
}

impl<P, S> SessionController<P, S>
where
    P: IdentityProvider,
    S: DocumentStore,
{
    /// Create a controller with an empty guest session
    pub fn new(provider: Arc<P>, store: Arc<S>) -> Self {
        Self {
            provider,
            store,
            session: Session::default(),
            active_view: View::Login,
        }
    }

    /// The current session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current role
    pub fn role(&self) -> Role {
        self.session.role
    }

    /// The currently visible view
    pub fn active_view(&self) -> View {
        self.active_view
    }

    /// Cache the member profile once a dashboard load has found it
    pub fn cache_profile(&mut self, profile: MemberProfile) {
        self.session.profile = Some(profile);
    }

    /// Look up the stored role for an identity.
    ///
    /// Fails soft: a missing profile or a store failure both resolve to
    /// [`Role::Guest`]; this never returns an error.
    pub async fn resolve_role(&self, identity: &Identity) -> Role {
        match self.store.get(collections::USERS, &identity.uid).await {
            Ok(Some(doc)) => doc
                .fields
                .get("role")
                .and_then(|v| v.as_str())
                .map(Role::parse)
                .unwrap_or(Role::Guest),
            Ok(None) => Role::Guest,
            Err(err) => {
                log::error!("resolve_user_role_failed error={}", err);
                Role::Guest
            }
        }
    }

    /// Upsert the profile-store record for an identity (last-write-wins)
    async fn upsert_user_profile(&self, identity: &Identity, role: Role) -> Result<(), Error> {
        let fields = json!({
            "email": identity.email,
            "role": role.as_str(),
            "updated_at": Utc::now().to_rfc3339(),
        });
        self.store
            .set_merge(collections::USERS, &identity.uid, &fields)
            .await?;
        log::info!("user_profile_upserted uid={} role={}", identity.uid, role);
        Ok(())
    }

    fn enter(&mut self, identity: Identity, role: Role) {
        self.session = Session {
            identity: Some(identity),
            role,
            profile: None,
        };
        self.active_view = role_view(role);
        log::info!("view_changed view={} role={}", self.active_view.as_str(), role);
    }

    fn reset_to_guest(&mut self) {
        self.session = Session::default();
        self.active_view = View::Login;
    }

    /// Sign in and resolve the effective role.
    ///
    /// Credential failures surface as [`Error::Auth`]. The requested role is
    /// written to the profile store, but the role that comes back from
    /// resolution is the one the session adopts.
    pub async fn authenticate(
        &mut self,
        email: &str,
        password: &str,
        requested_role: Role,
    ) -> Result<Role, Error> {
        log::info!("login_submit email={} requested_role={}", email, requested_role);
        let identity = match self.provider.sign_in(email, password).await {
            Ok(identity) => identity,
            Err(err) => {
                log::error!("login_failed email={} error={}", email, err);
                return Err(err);
            }
        };
        self.upsert_user_profile(&identity, requested_role).await?;
        let resolved = self.resolve_role(&identity).await;
        self.enter(identity, resolved);
        Ok(resolved)
    }

    /// Create an account and resolve the effective role.
    ///
    /// Input is validated before any network call. A requested member role
    /// additionally creates a gym member record, best-effort: a failure there
    /// is logged and does not fail the registration.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
        requested_role: Role,
        name: &str,
    ) -> Result<Role, Error> {
        if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(Error::validation("email and password are required"));
        }
        if password != confirm_password {
            return Err(Error::validation("passwords do not match"));
        }
        if password.len() < 6 {
            return Err(Error::validation("password must be at least 6 characters"));
        }

        log::info!("signup_submit email={} requested_role={}", email, requested_role);
        let identity = match self.provider.sign_up(email, password).await {
            Ok(identity) => identity,
            Err(err) => {
                log::error!("signup_failed email={} error={}", email, err);
                return Err(err);
            }
        };
        self.upsert_user_profile(&identity, requested_role).await?;

        if requested_role == Role::Member {
            let display_name = if name.is_empty() { email } else { name };
            let fields = json!({
                "name": display_name,
                "email": email,
                "created_at": Utc::now().to_rfc3339(),
            });
            match self.store.add(collections::MEMBERS, &fields).await {
                Ok(_) => log::info!("member_auto_created_from_signup email={}", email),
                Err(err) => {
                    log::error!("member_auto_create_failed email={} error={}", email, err)
                }
            }
        }

        let resolved = self.resolve_role(&identity).await;
        self.enter(identity, resolved);
        Ok(resolved)
    }

    /// Apply an auth-state event from the identity provider.
    ///
    /// `None` forces the session to guest regardless of prior state; `Some`
    /// resolves the role and enters the matching view. The provider fires
    /// this at least once at startup and on every login/logout.
    pub async fn apply_auth_state(&mut self, identity: Option<Identity>) -> Role {
        match identity {
            None => {
                log::info!("auth_state_changed uid=none");
                self.reset_to_guest();
                Role::Guest
            }
            Some(identity) => {
                log::info!("auth_state_changed uid={} email={}", identity.uid, identity.email);
                let role = self.resolve_role(&identity).await;
                self.enter(identity, role);
                role
            }
        }
    }

    /// Switch the active view, enforcing the role gate.
    ///
    /// Permitted when `required_role` is `None` or equals the current role;
    /// otherwise the state is untouched and one access-denied audit event is
    /// logged.
    pub fn navigate(&mut self, target: View, required_role: Option<Role>) -> Result<(), Error> {
        if let Some(required) = required_role {
            if required != self.session.role {
                log::warn!(
                    "nav_access_denied view={} required_role={} current_role={}",
                    target.as_str(),
                    required,
                    self.session.role
                );
                return Err(Error::AccessDenied {
                    view: target.as_str(),
                    required,
                });
            }
        }
        self.active_view = target;
        log::info!("view_changed view={} role={}", target.as_str(), self.session.role);
        Ok(())
    }

    /// Sign out and clear the session.
    ///
    /// The session is cleared to guest unconditionally; a provider failure is
    /// still surfaced after the local state is gone.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let result = self.provider.sign_out().await;
        self.reset_to_guest();
        if let Err(ref err) = result {
            log::error!("logout_failed error={}", err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_parse_to_guest() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("member"), Role::Member);
        assert_eq!(Role::parse("owner"), Role::Guest);
        assert_eq!(Role::parse(""), Role::Guest);
    }

    #[test]
    fn role_view_table_is_fixed() {
        assert_eq!(role_view(Role::Admin), View::Admin);
        assert_eq!(role_view(Role::Member), View::Member);
        assert_eq!(role_view(Role::Guest), View::Public);
    }

    #[test]
    fn every_role_sees_only_its_views() {
        assert_eq!(visible_views(Role::Guest), &[View::Login, View::Public]);
        assert_eq!(visible_views(Role::Member), &[View::Member, View::Public]);
        assert_eq!(visible_views(Role::Admin), &[View::Admin, View::Public]);
    }

    #[test]
    fn gated_views_name_their_role() {
        assert_eq!(View::Admin.required_role(), Some(Role::Admin));
        assert_eq!(View::Member.required_role(), Some(Role::Member));
        assert_eq!(View::Public.required_role(), None);
        assert_eq!(View::Login.required_role(), None);
    }
}
