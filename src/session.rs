//! Who is using the player.
//!
//! Collaborators ask a `SessionProvider` instead of reading ambient state,
//! so tests can swap in any session they like.

use crate::config::SessionSettings;

pub type UserId = String;

pub trait SessionProvider: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;

    /// Whether the session may perform privileged catalog changes.
    fn is_admin(&self) -> bool {
        false
    }
}

/// A session fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<UserId>,
    admin: bool,
}

impl StaticSession {
    pub fn new(user: Option<UserId>, admin: bool) -> Self {
        let user = user.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        // Admin rights only make sense for a signed-in user.
        let admin = admin && user.is_some();
        Self { user, admin }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.user.clone(), settings.admin)
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }

    fn is_admin(&self) -> bool {
        self.admin
    }
}
