//! The portal: one entry point per navigation or onboarding action.

use std::sync::Arc;

use marketgate_guard::{
    paths, AccessGuard, AuthState, GuardDecision, GuardInput, Loadable, PendingNotice, RouteTable,
};
use marketgate_nullables::{NullProfileStore, NullVerificationStore};
use marketgate_onboarding::{ProfileSync, WizardController};
use marketgate_store::{ProfileStore, VerificationStore};
use marketgate_store_lmdb::LmdbEnvironment;
use marketgate_types::Session;
use marketgate_verification::{Reviewer, StatusResolver};

use crate::{PortalConfig, PortalError};

/// Outcome of one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub decision: GuardDecision,
    /// Filled when the seller ends up on the pending page.
    pub notice: Option<PendingNotice>,
}

pub struct Portal {
    resolver: StatusResolver,
    profiles: ProfileSync,
    reviewer: Reviewer,
    guard: AccessGuard,
}

impl Portal {
    pub fn new(
        verifications: Arc<dyn VerificationStore>,
        profiles: Arc<dyn ProfileStore>,
        config: &PortalConfig,
    ) -> Self {
        let resolver = StatusResolver::new(verifications);
        let guard = AccessGuard::new(
            RouteTable::standard(config.unmatched_route_policy),
            config.login_path.clone(),
        );
        Self {
            reviewer: Reviewer::new(resolver.clone()),
            resolver,
            profiles: ProfileSync::new(profiles),
            guard,
        }
    }

    /// Open the LMDB environment named in the config.
    pub fn open(config: &PortalConfig) -> Result<Self, PortalError> {
        let env = LmdbEnvironment::open(&config.data_dir, config.lmdb_max_dbs, config.lmdb_map_size)?;
        Ok(Self::new(
            Arc::new(env.verification_store()),
            Arc::new(env.profile_store()),
            config,
        ))
    }

    /// A portal backed by in-memory stores.
    pub fn in_memory(config: &PortalConfig) -> Self {
        Self::new(
            Arc::new(NullVerificationStore::new()),
            Arc::new(NullProfileStore::new()),
            config,
        )
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    pub fn resolver(&self) -> &StatusResolver {
        &self.resolver
    }

    pub fn reviewer(&self) -> &Reviewer {
        &self.reviewer
    }

    /// Decide one navigation. Sellers heading into the seller area get their
    /// verification record fetched (and created on first visit) before the
    /// guard runs.
    pub async fn navigate(
        &self,
        session: Option<&Session>,
        pathname: &str,
    ) -> Result<Navigation, PortalError> {
        let auth = match session {
            Some(session) => AuthState::Authenticated(session.role),
            None => AuthState::Anonymous,
        };

        let mut record = None;
        if let Some(session) = session {
            if self.guard.needs_verification(session.role, pathname)
                || (session.is_seller() && self.guard.table().is_pending_page(pathname))
            {
                record = Some(self.resolver.ensure_verification(&session.user_id).await?);
            }
        }

        let verification = match &record {
            Some(r) => Loadable::Ready(r.status),
            None => Loadable::Loading,
        };
        let decision = self.guard.evaluate(GuardInput {
            auth,
            verification,
            pathname,
        });

        if let GuardDecision::Redirect { to, reason } = &decision {
            tracing::debug!(path = pathname, to = %to, reason = ?reason, "navigation redirected");
        }

        let lands_on_pending = match &decision {
            GuardDecision::Redirect { to, .. } => to == paths::PENDING,
            GuardDecision::Render => self.guard.table().is_pending_page(pathname),
            GuardDecision::Loading => false,
        };
        let notice = match record {
            Some(r) if lands_on_pending => {
                Some(PendingNotice::for_seller(r.status, r.profile_completed))
            }
            _ => None,
        };

        Ok(Navigation { decision, notice })
    }

    /// The pending-page message for a seller.
    pub async fn pending_notice(&self, session: &Session) -> Result<PendingNotice, PortalError> {
        if !session.is_seller() {
            return Err(PortalError::NotSeller);
        }
        let record = self.resolver.ensure_verification(&session.user_id).await?;
        Ok(PendingNotice::for_seller(record.status, record.profile_completed))
    }

    /// Open the onboarding wizard, resuming wherever the seller left off.
    pub async fn open_wizard(&self, session: Session) -> Result<WizardController, PortalError> {
        Ok(WizardController::load(session, self.resolver.clone(), self.profiles.clone()).await?)
    }
}
