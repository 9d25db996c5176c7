//! Role-based route-access decisions.
//!
//! A pure decision layer over [`SessionStore`]: given the attempted path
//! and the route's allowed-role list, decide render vs. redirect. The guard
//! holds no state of its own, so it is safe to re-evaluate on every
//! navigation without memoization hazards.

use sucre_store_core::Role;

use crate::session::SessionStore;
use crate::storage::StorageBackend;

/// Public login route. Unauthenticated navigation lands here.
pub const LOGIN_ROUTE: &str = "/admin/login";

/// General staff dashboard, the default fallback for a role mismatch.
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

/// Delivery-agent home, the fallback when the mismatched user delivers.
pub const DELIVERY_DASHBOARD: &str = "/delivery/dashboard";

/// Outcome of a protected-route evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the protected content.
    Render,
    /// Redirect to [`LOGIN_ROUTE`], remembering the intended destination so
    /// the login flow can return there after success (best effort, the
    /// login flow is not required to honor it).
    RedirectToLogin {
        /// The originally requested path.
        from: String,
    },
    /// Redirect to the nearest home for the user's role. This is a
    /// fallback, not an error page.
    Redirect(&'static str),
}

/// Decide whether navigation to `path` may render.
///
/// Evaluated in order, short-circuiting:
/// 1. Freshness check via [`SessionStore::check_auth`] (may normalize a
///    partial session).
/// 2. Unauthenticated: redirect to login, carrying `path`.
/// 3. Role-gated route (`allowed_roles` non-empty) without a matching role:
///    redirect to the delivery dashboard for delivery agents, otherwise to
///    the admin dashboard. A user with no recognized role is
///    least-privilege and matches no role-gated route.
/// 4. Otherwise render.
///
/// An empty `allowed_roles` means any authenticated user may render.
pub fn evaluate_route<S: StorageBackend, L: StorageBackend>(
    session: &mut SessionStore<S, L>,
    path: &str,
    allowed_roles: &[Role],
) -> AccessDecision {
    if !session.check_auth() || !session.is_authenticated() {
        return AccessDecision::RedirectToLogin {
            from: path.to_owned(),
        };
    }

    if !allowed_roles.is_empty() {
        let role = session.role();
        let authorized = role.is_some_and(|role| allowed_roles.contains(&role));
        if !authorized {
            let fallback = if role == Some(Role::DeliveryAgent) {
                DELIVERY_DASHBOARD
            } else {
                ADMIN_DASHBOARD
            };
            return AccessDecision::Redirect(fallback);
        }
    }

    AccessDecision::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthResponse;
    use crate::storage::MemoryStorage;

    fn logged_in(roles: &[&str]) -> SessionStore<MemoryStorage, MemoryStorage> {
        let mut session = SessionStore::new(MemoryStorage::new(), MemoryStorage::new());
        session.login(AuthResponse {
            token: "t1".to_owned(),
            username: "alice".to_owned(),
            roles: roles.iter().map(|&r| r.to_owned()).collect(),
        });
        session
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_origin() {
        let mut session = SessionStore::new(MemoryStorage::new(), MemoryStorage::new());
        let decision = evaluate_route(&mut session, "/admin/orders", &[Role::Admin]);
        assert_eq!(
            decision,
            AccessDecision::RedirectToLogin {
                from: "/admin/orders".to_owned()
            }
        );
    }

    #[test]
    fn test_matching_role_renders() {
        let mut session = logged_in(&["ROLE_ADMIN"]);
        let decision = evaluate_route(
            &mut session,
            "/admin/orders",
            &[Role::SuperAdmin, Role::Admin],
        );
        assert_eq!(decision, AccessDecision::Render);
    }

    #[test]
    fn test_empty_role_list_admits_any_authenticated_user() {
        let mut session = logged_in(&["ROLE_MANAGER"]);
        assert_eq!(
            evaluate_route(&mut session, "/admin/profile", &[]),
            AccessDecision::Render
        );
    }

    #[test]
    fn test_delivery_agent_falls_back_to_delivery_dashboard() {
        let mut session = logged_in(&["ROLE_DELIVERY_AGENT"]);
        let decision = evaluate_route(&mut session, "/admin/users", &[Role::SuperAdmin]);
        assert_eq!(decision, AccessDecision::Redirect(DELIVERY_DASHBOARD));
    }

    #[test]
    fn test_other_role_mismatch_falls_back_to_admin_dashboard() {
        let mut session = logged_in(&["ROLE_MANAGER"]);
        let decision = evaluate_route(&mut session, "/admin/users", &[Role::SuperAdmin]);
        assert_eq!(decision, AccessDecision::Redirect(ADMIN_DASHBOARD));
    }

    #[test]
    fn test_null_role_is_least_privilege() {
        let mut session = logged_in(&[]);
        // Authenticated, but matches no role-gated route
        let decision = evaluate_route(&mut session, "/admin/users", &[Role::Admin]);
        assert_eq!(decision, AccessDecision::Redirect(ADMIN_DASHBOARD));

        // Ungated routes still render
        assert_eq!(
            evaluate_route(&mut session, "/admin/profile", &[]),
            AccessDecision::Render
        );
    }

    #[test]
    fn test_guard_normalizes_stale_session() {
        let mut session = logged_in(&["ROLE_ADMIN"]);
        session.logout();

        let decision = evaluate_route(&mut session, "/admin/orders", &[Role::Admin]);
        assert!(matches!(decision, AccessDecision::RedirectToLogin { .. }));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_reevaluation_is_stable() {
        let mut session = logged_in(&["ROLE_ADMIN"]);
        for _ in 0..3 {
            assert_eq!(
                evaluate_route(&mut session, "/admin/orders", &[Role::Admin]),
                AccessDecision::Render
            );
        }
    }
}
