//! Session store: the single source of truth for "who is logged in and
//! with what credential".
//!
//! The store owns its persistence: every lifecycle transition snapshots the
//! session record into a tab-scoped backend. Restore normalizes any record
//! that violates the session invariant (authenticated implies both user and
//! token present) down to fully logged-out, so callers never observe a
//! partial session.

use serde::{Deserialize, Serialize};

use sucre_store_core::Role;

use crate::api::{AuthClient, AuthResponse};
use crate::storage::{StorageBackend, keys};

/// Session-stored user identity.
///
/// Minimal data kept in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username of the authenticated account.
    pub username: String,
    /// Canonical role, mapped once from the wire tag at login. `None` when
    /// the auth payload carried no recognizable role (least privilege).
    pub role: Option<Role>,
}

/// The persisted session record.
///
/// Exactly `{user, token, is_authenticated}` - transient UI flags such as
/// the loading indicator are deliberately excluded.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    user: Option<CurrentUser>,
    token: Option<String>,
    is_authenticated: bool,
}

impl SessionRecord {
    /// A record is valid only when the flag, user, and token agree.
    const fn is_valid(&self) -> bool {
        self.is_authenticated && self.user.is_some() && self.token.is_some()
    }
}

/// Authentication/session state container.
///
/// Explicitly constructed with its two storage backends (the tab-scoped
/// session record and the durable store holding the legacy credential) and
/// an optional [`AuthClient`] for the best-effort logout notification.
/// Consumers read through the accessors; all mutation goes through
/// [`login`](Self::login), [`logout`](Self::logout), and
/// [`check_auth`](Self::check_auth) so persistence stays consistent.
pub struct SessionStore<S: StorageBackend, L: StorageBackend> {
    user: Option<CurrentUser>,
    token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
    storage: S,
    legacy: L,
    api: Option<AuthClient>,
}

impl<S: StorageBackend, L: StorageBackend> SessionStore<S, L> {
    /// Build a store, restoring any persisted session record from
    /// `storage`. `legacy` is the durable backend older client builds cached
    /// the bearer credential in; login and logout clear it.
    pub fn new(storage: S, legacy: L) -> Self {
        Self::build(storage, legacy, None)
    }

    /// Same as [`new`](Self::new), with an [`AuthClient`] attached so
    /// `logout` can notify the server. When a client is attached, `logout`
    /// (and therefore `check_auth`) must run within a Tokio runtime.
    pub fn with_api(storage: S, legacy: L, api: AuthClient) -> Self {
        Self::build(storage, legacy, Some(api))
    }

    fn build(storage: S, legacy: L, api: Option<AuthClient>) -> Self {
        let record = Self::restore(&storage);
        Self {
            user: record.user,
            token: record.token,
            is_authenticated: record.is_authenticated,
            is_loading: false,
            storage,
            legacy,
            api,
        }
    }

    /// Load and normalize the persisted record. Anything unreadable or
    /// violating the session invariant restores as fully logged-out.
    fn restore(storage: &S) -> SessionRecord {
        let Some(raw) = storage
            .load(keys::SESSION)
            .unwrap_or_else(|e| {
                tracing::warn!("failed to read session record: {e}");
                None
            })
        else {
            return SessionRecord::default();
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) if record.is_valid() => record,
            Ok(_) => {
                tracing::debug!("discarding partial session record");
                SessionRecord::default()
            }
            Err(e) => {
                tracing::warn!("corrupt session record, starting logged out: {e}");
                SessionRecord::default()
            }
        }
    }

    /// Apply a successful authentication payload.
    ///
    /// The canonical role is the first wire tag mapped through
    /// [`Role::from_wire`]; an empty or unrecognized list degrades to `None`
    /// rather than failing. Also removes the legacy unscoped credential so a
    /// stale token cannot leak across storage strategies.
    pub fn login(&mut self, auth: AuthResponse) {
        let role = auth.roles.first().and_then(|tag| Role::from_wire(tag));
        if role.is_none() {
            tracing::debug!(username = %auth.username, "login without a recognized role");
        }

        self.user = Some(CurrentUser {
            username: auth.username,
            role,
        });
        self.token = Some(auth.token);
        self.is_authenticated = true;

        if let Err(e) = self.legacy.remove(keys::LEGACY_TOKEN) {
            tracing::warn!("failed to invalidate legacy credential: {e}");
        }
        self.persist();
    }

    /// End the session.
    ///
    /// Best-effort notifies the server when a client is attached (failure is
    /// logged and swallowed), then unconditionally clears the in-memory
    /// state and every persisted trace of the session. Idempotent.
    pub fn logout(&mut self) {
        if self.is_authenticated {
            if let (Some(api), Some(token)) = (&self.api, &self.token) {
                api.notify_logout(token);
            }
        }

        self.user = None;
        self.token = None;
        self.is_authenticated = false;

        if let Err(e) = self.storage.remove(keys::SESSION) {
            tracing::warn!("failed to clear session record: {e}");
        }
        if let Err(e) = self.legacy.remove(keys::LEGACY_TOKEN) {
            tracing::warn!("failed to clear legacy credential: {e}");
        }
    }

    /// Freshness check for protected-route entry.
    ///
    /// Returns `true` when both token and user are present. Any partial
    /// state is normalized by a full [`logout`](Self::logout) and reported
    /// as `false`. Safe to call on every guard evaluation.
    pub fn check_auth(&mut self) -> bool {
        if self.token.is_some() && self.user.is_some() {
            return true;
        }
        self.logout();
        false
    }

    /// Current user, if authenticated.
    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Bearer credential, if authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a login has been applied and not cleared.
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Canonical role of the current user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|user| user.role)
    }

    /// Transient loading indicator for login-in-flight UI. Never persisted.
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Set the transient loading indicator.
    pub const fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// The tab-scoped backend holding the session record.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The durable backend holding the legacy credential.
    pub const fn legacy_storage(&self) -> &L {
        &self.legacy
    }

    /// Snapshot the session record. Persistence is fire-and-forget: a
    /// failure loses at most this mutation and is logged, never surfaced.
    fn persist(&mut self) {
        let record = SessionRecord {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.storage.store(keys::SESSION, &json) {
                    tracing::warn!("failed to persist session record: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize session record: {e}"),
        }
    }

    /// Force a partial session for normalization tests.
    #[cfg(test)]
    fn set_partial_state(&mut self, token: Option<&str>, user: Option<CurrentUser>) {
        self.token = token.map(str::to_owned);
        self.user = user;
        self.is_authenticated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn auth_response(token: &str, username: &str, roles: &[&str]) -> AuthResponse {
        serde_json::from_value(serde_json::json!({
            "token": token,
            "username": username,
            "roles": roles,
        }))
        .expect("auth response")
    }

    fn store() -> SessionStore<MemoryStorage, MemoryStorage> {
        SessionStore::new(MemoryStorage::new(), MemoryStorage::new())
    }

    #[test]
    fn test_login_maps_first_wire_role() {
        let mut session = store();
        session.login(auth_response("t1", "alice", &["ROLE_ADMIN"]));

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("t1"));
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[test]
    fn test_login_with_multiple_roles_takes_first() {
        let mut session = store();
        session.login(auth_response(
            "t1",
            "bob",
            &["ROLE_DELIVERY_AGENT", "ROLE_ADMIN"],
        ));
        assert_eq!(session.role(), Some(Role::DeliveryAgent));
    }

    #[test]
    fn test_login_without_roles_degrades_to_none() {
        let mut session = store();
        session.login(auth_response("t1", "carol", &[]));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), None);

        session.login(auth_response("t2", "carol", &["ROLE_WAREHOUSE"]));
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_login_removes_legacy_credential() {
        let legacy = MemoryStorage::with_records([(
            keys::LEGACY_TOKEN.to_owned(),
            "stale-token".to_owned(),
        )]);
        let mut session = SessionStore::new(MemoryStorage::new(), legacy);
        session.login(auth_response("t1", "alice", &["ROLE_ADMIN"]));

        assert!(!session.legacy_storage().contains(keys::LEGACY_TOKEN));
    }

    #[test]
    fn test_logout_clears_everything_and_is_idempotent() {
        let mut session = store();
        session.login(auth_response("t1", "alice", &["ROLE_ADMIN"]));
        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
        assert!(!session.storage().contains(keys::SESSION));

        // Logging out again is a no-op success
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_check_auth_normalizes_token_without_user() {
        let mut session = store();
        session.set_partial_state(Some("t1"), None);

        assert!(!session.check_auth());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_check_auth_normalizes_user_without_token() {
        let mut session = store();
        session.set_partial_state(
            None,
            Some(CurrentUser {
                username: "alice".to_owned(),
                role: Some(Role::Admin),
            }),
        );

        assert!(!session.check_auth());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_check_auth_true_when_logged_in() {
        let mut session = store();
        session.login(auth_response("t1", "alice", &["ROLE_MANAGER"]));
        assert!(session.check_auth());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_restore_roundtrip() {
        let mut session = store();
        session.login(auth_response("t1", "alice", &["ROLE_SUPER_ADMIN"]));
        let record = session
            .storage()
            .load(keys::SESSION)
            .expect("load")
            .expect("record");

        let storage = MemoryStorage::with_records([(keys::SESSION.to_owned(), record)]);
        let restored = SessionStore::new(storage, MemoryStorage::new());
        assert!(restored.is_authenticated());
        assert_eq!(restored.role(), Some(Role::SuperAdmin));
        assert_eq!(restored.token(), Some("t1"));
    }

    #[test]
    fn test_restore_normalizes_partial_record() {
        // Token but no user: invariant violated, restore logged out
        let storage = MemoryStorage::with_records([(
            keys::SESSION.to_owned(),
            r#"{"user":null,"token":"t1","is_authenticated":true}"#.to_owned(),
        )]);
        let session = SessionStore::new(storage, MemoryStorage::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_restore_ignores_corrupt_record() {
        let storage =
            MemoryStorage::with_records([(keys::SESSION.to_owned(), "not json".to_owned())]);
        let session = SessionStore::new(storage, MemoryStorage::new());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_loading_flag_is_not_persisted() {
        let mut session = store();
        session.set_loading(true);
        session.login(auth_response("t1", "alice", &["ROLE_ADMIN"]));

        let record = session
            .storage()
            .load(keys::SESSION)
            .expect("load")
            .expect("record");
        assert!(!record.contains("is_loading"));
        assert!(session.is_loading());
    }
}
