//! Application context: theme and authentication state
//!
//! Components that need theme or auth receive an [`AppContext`] and
//! subscribe to the observables they care about. Persistence goes through
//! a [`PreferenceStore`] supplied by the host.

mod observable;

pub use observable::{Observable, Subscription};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Store key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Store key of the persisted session credential.
pub const SESSION_KEY: &str = "auth.session";

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Account kind of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Learner account
    Member,
    /// Academy operator account
    Academy,
    /// Back-office administrator
    Admin,
}

/// A signed-in session, persisted as the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account identifier
    pub user_id: String,
    /// Name shown in the header
    pub display_name: String,
    /// Account kind
    pub role: Role,
    /// Opaque access token
    pub token: String,
}

/// Authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Nobody is signed in
    #[default]
    Anonymous,
    /// A user is signed in
    SignedIn(Session),
}

impl AuthState {
    /// Check if a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    /// Check if the signed-in user may open the back office.
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthState::SignedIn(s) if s.role == Role::Admin)
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::SignedIn(s) => Some(s),
            AuthState::Anonymous => None,
        }
    }
}

/// Persisted key/value preferences (browser storage or equivalent).
pub trait PreferenceStore {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Theme and auth state for one running application.
pub struct AppContext<S: PreferenceStore> {
    store: S,
    theme: Observable<Theme>,
    auth: Observable<AuthState>,
}

impl<S: PreferenceStore> AppContext<S> {
    /// Restore persisted theme and session from `store`.
    ///
    /// An unreadable persisted session is discarded and the context starts
    /// signed out.
    pub fn new(mut store: S) -> Result<Self> {
        let theme = match store.get(THEME_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "ignoring unknown persisted theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let auth = match store.get(SESSION_KEY)? {
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => AuthState::SignedIn(session),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable persisted session");
                    store.remove(SESSION_KEY)?;
                    AuthState::Anonymous
                }
            },
            None => AuthState::Anonymous,
        };

        Ok(Self {
            store,
            theme: Observable::new(theme),
            auth: Observable::new(auth),
        })
    }

    /// Handle to the theme observable.
    pub fn theme(&self) -> Observable<Theme> {
        self.theme.clone()
    }

    /// Handle to the auth observable.
    pub fn auth(&self) -> Observable<AuthState> {
        self.auth.clone()
    }

    /// The preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Set and persist the theme.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme.set(theme);
        Ok(())
    }

    /// Switch to the other theme and persist it.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.get().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Persist `session` and mark the user signed in.
    pub fn login(&mut self, session: Session) -> Result<()> {
        let raw = serde_json::to_string(&session).map_err(|e| NavError::Storage(e.to_string()))?;
        self.store.set(SESSION_KEY, &raw)?;
        tracing::debug!(user_id = %session.user_id, role = ?session.role, "signed in");
        self.auth.set(AuthState::SignedIn(session));
        Ok(())
    }

    /// Clear the persisted credential and reset to signed out.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        self.auth.set(AuthState::Anonymous);
        tracing::debug!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn admin() -> Session {
        Session {
            user_id: "u-1".into(),
            display_name: "관리자".into(),
            role: Role::Admin,
            token: "tok".into(),
        }
    }

    #[test]
    fn test_theme_toggle_persists_and_notifies() {
        let mut cx = AppContext::new(MemoryStore::new()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            cx.theme().subscribe(move |t| seen.borrow_mut().push(*t))
        };
        assert_eq!(cx.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(cx.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(*seen.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn test_session_restored_from_store() {
        let mut store = MemoryStore::new();
        store
            .set(SESSION_KEY, &serde_json::to_string(&admin()).unwrap())
            .unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        let cx = AppContext::new(store).unwrap();
        assert!(cx.auth().get().is_admin());
        assert_eq!(cx.theme().get(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();
        store.set(THEME_KEY, "sepia").unwrap();
        let cx = AppContext::new(store).unwrap();
        assert_eq!(cx.auth().get(), AuthState::Anonymous);
        assert_eq!(cx.theme().get(), Theme::Light);
        assert_eq!(cx.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_clears_credential_and_flags() {
        let mut cx = AppContext::new(MemoryStore::new()).unwrap();
        cx.login(admin()).unwrap();
        assert!(cx.auth().get().is_signed_in());
        assert!(cx.store().get(SESSION_KEY).unwrap().is_some());

        cx.logout().unwrap();
        assert_eq!(cx.auth().get(), AuthState::Anonymous);
        assert_eq!(cx.store().get(SESSION_KEY).unwrap(), None);
    }
}
