//! Route access guard for the dashboard.
//!
//! [`AccessGuard::evaluate`] is a pure function of the session's auth
//! state, its role, the seller's verification status and the requested
//! path. It either renders, redirects, or asks the caller to wait while an
//! input it depends on is still loading.

pub mod guard;
pub mod notice;
pub mod routes;

pub use guard::{AccessGuard, AuthState, Denial, GuardDecision, GuardInput, Loadable};
pub use notice::{IncompleteBanner, PendingNotice};
pub use routes::{default_dashboard, paths, FallbackPolicy, RouteArea, RouteRule, RouteTable};
