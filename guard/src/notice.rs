//! What the pending-status page tells a seller.

use marketgate_types::VerificationStatus;

use crate::routes::paths;

/// Non-blocking banner shown while onboarding is unfinished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncompleteBanner {
    pub message: &'static str,
    pub link: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNotice {
    pub status: VerificationStatus,
    pub headline: &'static str,
    pub detail: &'static str,
    /// Present until the seller submits the final onboarding step.
    pub banner: Option<IncompleteBanner>,
    /// The wizard stays reachable in every status.
    pub wizard_link: &'static str,
}

impl PendingNotice {
    pub fn for_seller(status: VerificationStatus, profile_completed: bool) -> Self {
        let (headline, detail) = match status {
            VerificationStatus::Pending => (
                "Your store is awaiting review",
                "An administrator will review your application shortly.",
            ),
            VerificationStatus::Rejected => (
                "Your application was not approved",
                "Update your store profile and resubmit it for another review.",
            ),
            VerificationStatus::Suspended => (
                "Your store has been suspended",
                "Review your store details and resubmit them to request reinstatement.",
            ),
            VerificationStatus::Approved => (
                "Your store is approved",
                "You have full access to the seller dashboard.",
            ),
        };
        let banner = (!profile_completed).then_some(IncompleteBanner {
            message: "Your seller profile is incomplete. Finish onboarding to be reviewed.",
            link: paths::ONBOARDING,
        });
        Self {
            status,
            headline,
            detail,
            banner,
            wizard_link: paths::ONBOARDING,
        }
    }
}
