//! The routing table: which roles may open which paths.

use marketgate_types::Role;
use serde::{Deserialize, Serialize};

pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ADMIN_DASHBOARD: &str = "/dashboard/admin";
    pub const SELLER_DASHBOARD: &str = "/dashboard/seller";
    pub const BUYER_DASHBOARD: &str = "/dashboard/buyer";
    pub const NOTIFICATIONS: &str = "/dashboard/notifications";
    pub const PROFILE: &str = "/dashboard/profile";
    pub const ONBOARDING: &str = "/seller/onboarding";
    pub const PENDING: &str = "/seller/pending";
}

const ALL_ROLES: &[Role] = &Role::ALL;
const SELLER_ONLY: &[Role] = &[Role::Seller];
const BUYER_ONLY: &[Role] = &[Role::Buyer];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const NO_ROLES: &[Role] = &[];

/// What part of the product a route belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteArea {
    /// Seller dashboard. Needs an approved verification.
    Seller,
    Buyer,
    Admin,
    /// Open to every role.
    Shared,
    /// Wizard and pending page. Sellers only, whatever their status.
    Onboarding,
}

/// What to do with a path no rule matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Unknown routes are open to every role, so new pages never lock
    /// anybody out.
    #[default]
    AllowAll,
    /// Unknown routes are closed; every role is sent to its dashboard.
    DenyAll,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: &'static str,
    /// Match only the prefix itself, not paths below it.
    pub exact: bool,
    pub allowed: &'static [Role],
    pub area: RouteArea,
}

impl RouteRule {
    const fn under(prefix: &'static str, allowed: &'static [Role], area: RouteArea) -> Self {
        Self {
            prefix,
            exact: false,
            allowed,
            area,
        }
    }

    const fn exactly(prefix: &'static str, allowed: &'static [Role], area: RouteArea) -> Self {
        Self {
            prefix,
            exact: true,
            allowed,
            area,
        }
    }

    fn matches(&self, path: &str) -> bool {
        if path == self.prefix {
            return true;
        }
        !self.exact
            && path
                .strip_prefix(self.prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: FallbackPolicy,
}

impl RouteTable {
    /// The dashboard routes plus the onboarding destinations.
    pub fn standard(fallback: FallbackPolicy) -> Self {
        Self {
            rules: vec![
                RouteRule::under(paths::SELLER_DASHBOARD, SELLER_ONLY, RouteArea::Seller),
                RouteRule::under(paths::BUYER_DASHBOARD, BUYER_ONLY, RouteArea::Buyer),
                RouteRule::under(paths::ADMIN_DASHBOARD, ADMIN_ONLY, RouteArea::Admin),
                RouteRule::under(paths::NOTIFICATIONS, ALL_ROLES, RouteArea::Shared),
                RouteRule::under(paths::PROFILE, ALL_ROLES, RouteArea::Shared),
                RouteRule::exactly(paths::DASHBOARD, ALL_ROLES, RouteArea::Shared),
                RouteRule::under(paths::ONBOARDING, SELLER_ONLY, RouteArea::Onboarding),
                RouteRule::under(paths::PENDING, SELLER_ONLY, RouteArea::Onboarding),
            ],
            fallback,
        }
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// The longest rule matching `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize(path);
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.prefix.len())
    }

    /// Roles allowed on `path`, falling back to the configured policy.
    pub fn allowed_roles(&self, path: &str) -> &'static [Role] {
        match self.resolve(path) {
            Some(rule) => rule.allowed,
            None => match self.fallback {
                FallbackPolicy::AllowAll => ALL_ROLES,
                FallbackPolicy::DenyAll => NO_ROLES,
            },
        }
    }

    /// Whether `path` is the pending-status page, query and fragment aside.
    pub fn is_pending_page(&self, path: &str) -> bool {
        self.resolve(path)
            .is_some_and(|rule| rule.prefix == paths::PENDING)
    }

    /// Whether `path` is in the seller dashboard and so needs approval.
    pub fn is_seller_area(&self, path: &str) -> bool {
        self.resolve(path)
            .is_some_and(|rule| rule.area == RouteArea::Seller)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard(FallbackPolicy::default())
    }
}

/// The landing page for each role.
pub fn default_dashboard(role: Role) -> &'static str {
    match role {
        Role::Admin => paths::ADMIN_DASHBOARD,
        Role::Seller => paths::SELLER_DASHBOARD,
        Role::Buyer | Role::Moderator => paths::BUYER_DASHBOARD,
    }
}

/// Drop query, fragment and trailing slashes.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_match_on_segment_boundaries() {
        let table = RouteTable::default();
        assert!(table.is_seller_area("/dashboard/seller"));
        assert!(table.is_seller_area("/dashboard/seller/orders"));
        assert!(table.is_seller_area("/dashboard/seller/orders/?page=2"));
        assert!(!table.is_seller_area("/dashboard/sellerish"));
        assert!(!table.is_seller_area("/seller/pending"));
    }

    #[test]
    fn pending_page_ignores_query_and_fragment() {
        let table = RouteTable::default();
        for path in [
            "/seller/pending",
            "/seller/pending/",
            "/seller/pending?from=email",
            "/seller/pending#status",
        ] {
            assert!(table.is_pending_page(path), "{path}");
        }
        assert!(!table.is_pending_page("/seller/onboarding?step=2"));
        assert!(!table.is_pending_page("/seller/pendingx"));
    }

    #[test]
    fn bare_dashboard_is_exact() {
        let table = RouteTable::default();
        assert_eq!(
            table.resolve("/dashboard/").map(|r| r.area),
            Some(RouteArea::Shared)
        );
        assert!(table.resolve("/dashboard/reports").is_none());
    }

    #[test]
    fn fallback_policy_applies_to_unknown_paths() {
        let open = RouteTable::standard(FallbackPolicy::AllowAll);
        assert_eq!(open.allowed_roles("/dashboard/reports"), ALL_ROLES);
        let closed = RouteTable::standard(FallbackPolicy::DenyAll);
        assert!(closed.allowed_roles("/dashboard/reports").is_empty());
        assert_eq!(closed.allowed_roles("/dashboard/profile"), ALL_ROLES);
    }

    #[test]
    fn shared_paths_allow_everyone() {
        let table = RouteTable::default();
        for path in ["/dashboard", "/dashboard/notifications", "/dashboard/profile/edit"] {
            assert_eq!(table.allowed_roles(path), ALL_ROLES, "{path}");
        }
    }

    #[test]
    fn default_dashboards() {
        assert_eq!(default_dashboard(Role::Admin), "/dashboard/admin");
        assert_eq!(default_dashboard(Role::Seller), "/dashboard/seller");
        assert_eq!(default_dashboard(Role::Buyer), "/dashboard/buyer");
        assert_eq!(default_dashboard(Role::Moderator), "/dashboard/buyer");
    }
}
