//! The access decision.

use marketgate_types::{Role, VerificationStatus};

use crate::routes::{default_dashboard, paths, RouteTable};

/// A value that may still be on its way from a remote source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    Anonymous,
    Authenticated(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardInput<'a> {
    pub auth: AuthState,
    /// Only consulted for sellers on seller-area paths.
    pub verification: Loadable<VerificationStatus>,
    pub pathname: &'a str,
}

/// Why a navigation was redirected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    /// No session. Recoverable by signing in.
    AuthenticationMissing,
    /// Signed in with a role the route does not admit.
    AuthorizationMismatch,
    /// A seller whose verification is not approved.
    VerificationNotApproved(VerificationStatus),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a placeholder; an input the decision needs is still loading.
    Loading,
    Render,
    Redirect { to: String, reason: Denial },
}

impl GuardDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccessGuard {
    table: RouteTable,
    login_path: String,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new(RouteTable::default(), paths::LOGIN)
    }
}

impl AccessGuard {
    pub fn new(table: RouteTable, login_path: impl Into<String>) -> Self {
        Self {
            table,
            login_path: login_path.into(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Whether deciding `pathname` for `role` needs the verification status.
    pub fn needs_verification(&self, role: Role, pathname: &str) -> bool {
        role == Role::Seller && self.table.is_seller_area(pathname)
    }

    pub fn evaluate(&self, input: GuardInput<'_>) -> GuardDecision {
        let role = match input.auth {
            AuthState::Loading => return GuardDecision::Loading,
            AuthState::Anonymous => {
                return GuardDecision::Redirect {
                    to: self.login_redirect(input.pathname),
                    reason: Denial::AuthenticationMissing,
                }
            }
            AuthState::Authenticated(role) => role,
        };

        if !self.table.allowed_roles(input.pathname).contains(&role) {
            return GuardDecision::Redirect {
                to: self.home_for(role).to_string(),
                reason: Denial::AuthorizationMismatch,
            };
        }

        if self.needs_verification(role, input.pathname) {
            let status = match input.verification {
                Loadable::Loading => return GuardDecision::Loading,
                Loadable::Ready(status) => status,
            };
            if !status.grants_seller_access() {
                return GuardDecision::Redirect {
                    to: paths::PENDING.to_string(),
                    reason: Denial::VerificationNotApproved(status),
                };
            }
        }

        GuardDecision::Render
    }

    /// The role's default dashboard, or the shared dashboard root when the
    /// table does not admit the role there (moderators), so a redirect can
    /// never point at a page that redirects again.
    // Moderators map to the buyer dashboard, which is buyer-only; falling
    // back to `/dashboard` keeps every redirect to a single hop.
    pub fn home_for(&self, role: Role) -> &'static str {
        let home = default_dashboard(role);
        if self.table.allowed_roles(home).contains(&role) {
            home
        } else {
            paths::DASHBOARD
        }
    }

    fn login_redirect(&self, pathname: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(pathname.as_bytes()).collect();
        format!("{}?redirect={}", self.login_path, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FallbackPolicy;

    fn input(auth: AuthState, status: Loadable<VerificationStatus>, path: &str) -> GuardInput<'_> {
        GuardInput {
            auth,
            verification: status,
            pathname: path,
        }
    }

    fn seller() -> AuthState {
        AuthState::Authenticated(Role::Seller)
    }

    #[test]
    fn unresolved_auth_is_loading() {
        let guard = AccessGuard::default();
        let decision = guard.evaluate(input(AuthState::Loading, Loadable::Loading, "/dashboard"));
        assert_eq!(decision, GuardDecision::Loading);
    }

    #[test]
    fn anonymous_goes_to_login_with_return_path() {
        let guard = AccessGuard::default();
        let decision = guard.evaluate(input(
            AuthState::Anonymous,
            Loadable::Loading,
            "/dashboard/seller/orders",
        ));
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/login?redirect=%2Fdashboard%2Fseller%2Forders".into(),
                reason: Denial::AuthenticationMissing,
            }
        );
    }

    #[test]
    fn seller_waits_for_status_on_seller_paths_only() {
        let guard = AccessGuard::default();
        assert_eq!(
            guard.evaluate(input(seller(), Loadable::Loading, "/dashboard/seller/products")),
            GuardDecision::Loading
        );
        assert_eq!(
            guard.evaluate(input(seller(), Loadable::Loading, "/dashboard/profile")),
            GuardDecision::Render
        );
    }

    #[test]
    fn unapproved_seller_goes_to_pending() {
        let guard = AccessGuard::default();
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Rejected,
            VerificationStatus::Suspended,
        ] {
            assert_eq!(
                guard.evaluate(input(seller(), Loadable::Ready(status), "/dashboard/seller")),
                GuardDecision::Redirect {
                    to: "/seller/pending".into(),
                    reason: Denial::VerificationNotApproved(status),
                }
            );
        }
    }

    #[test]
    fn approved_seller_renders() {
        let guard = AccessGuard::default();
        let decision = guard.evaluate(input(
            seller(),
            Loadable::Ready(VerificationStatus::Approved),
            "/dashboard/seller/orders",
        ));
        assert_eq!(decision, GuardDecision::Render);
    }

    #[test]
    fn buyer_on_seller_path_goes_home() {
        let guard = AccessGuard::default();
        let decision = guard.evaluate(input(
            AuthState::Authenticated(Role::Buyer),
            Loadable::Loading,
            "/dashboard/seller/orders",
        ));
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/dashboard/buyer".into(),
                reason: Denial::AuthorizationMismatch,
            }
        );
    }

    #[test]
    fn moderator_is_sent_to_shared_root() {
        let guard = AccessGuard::default();
        let decision = guard.evaluate(input(
            AuthState::Authenticated(Role::Moderator),
            Loadable::Loading,
            "/dashboard/admin",
        ));
        assert_eq!(decision.redirect_target(), Some("/dashboard"));
        assert_eq!(
            guard.evaluate(input(
                AuthState::Authenticated(Role::Moderator),
                Loadable::Loading,
                "/dashboard"
            )),
            GuardDecision::Render
        );
    }

    #[test]
    fn onboarding_pages_ignore_status() {
        let guard = AccessGuard::default();
        for path in ["/seller/onboarding", "/seller/pending"] {
            assert_eq!(
                guard.evaluate(input(seller(), Loadable::Loading, path)),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn deny_all_fallback_redirects_unknown_paths() {
        let guard = AccessGuard::new(RouteTable::standard(FallbackPolicy::DenyAll), "/login");
        let decision = guard.evaluate(input(
            AuthState::Authenticated(Role::Admin),
            Loadable::Loading,
            "/dashboard/reports",
        ));
        assert_eq!(decision.redirect_target(), Some("/dashboard/admin"));
        let open = AccessGuard::default();
        assert_eq!(
            open.evaluate(input(
                AuthState::Authenticated(Role::Admin),
                Loadable::Loading,
                "/dashboard/reports"
            )),
            GuardDecision::Render
        );
    }
}
