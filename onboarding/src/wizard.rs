//! Wizard controller: resume, in-memory navigation, step-boundary saves.
//!
//! The controller is shared behind `&self` so a UI can keep polling it
//! while a save is running. Only one save may be in flight at a time; a
//! second `next`/`submit` during a save is refused with
//! [`WizardError::SaveInFlight`]. In-memory state only moves after the
//! store confirms a write.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use marketgate_store::SellerVerification;
use marketgate_types::{CompletionStep, Session, VerificationStatus};
use marketgate_verification::StatusResolver;

use crate::validation::validate_step;
use crate::{ProfileSync, StepData, WizardDraft, WizardError, WizardStep};

struct WizardState {
    current: WizardStep,
    draft: WizardDraft,
    /// Mirror of the stored record as of our last read or write.
    persisted: SellerVerification,
}

pub struct WizardController {
    session: Session,
    resolver: StatusResolver,
    profiles: ProfileSync,
    state: Mutex<WizardState>,
    saving: AtomicBool,
    saves: AtomicU64,
}

/// Marks a save as in flight for as long as it lives.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a AtomicBool) -> Result<Self, WizardError> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(WizardError::SaveInFlight);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl WizardController {
    /// Open the wizard for a seller, creating their verification record if
    /// needed and resuming one step past the last saved one.
    pub async fn load(
        session: Session,
        resolver: StatusResolver,
        profiles: ProfileSync,
    ) -> Result<Self, WizardError> {
        if !session.is_seller() {
            return Err(WizardError::NotSeller(session.role));
        }
        let record = resolver.ensure_verification(&session.user_id).await?;
        let profile = profiles.load(&session).await?;

        let current = WizardStep::resume_from(record.completion_step);
        let draft = WizardDraft::from_persisted(&record, profile.as_ref());
        tracing::debug!(
            seller = %session.user_id,
            persisted = %record.completion_step,
            resume = %current,
            "onboarding wizard loaded"
        );

        Ok(Self {
            session,
            resolver,
            profiles,
            state: Mutex::new(WizardState {
                current,
                draft,
                persisted: record,
            }),
            saving: AtomicBool::new(false),
            saves: AtomicU64::new(0),
        })
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_step(&self) -> WizardStep {
        self.state().current
    }

    pub fn persisted_step(&self) -> CompletionStep {
        self.state().persisted.completion_step
    }

    /// Status as last confirmed by the store.
    pub fn status(&self) -> VerificationStatus {
        self.state().persisted.status
    }

    pub fn profile_completed(&self) -> bool {
        self.state().persisted.profile_completed
    }

    /// Steps at or below the persisted marker are confirmed.
    pub fn is_confirmed(&self, step: WizardStep) -> bool {
        step.index() <= self.persisted_step().get()
    }

    pub fn draft(&self) -> WizardDraft {
        self.state().draft.clone()
    }

    /// Whether the next/submit control should be disabled.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Number of step saves and submissions that reached the store.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Record input for the current step. Never touches storage.
    ///
    /// Refused while a save is running, so the draft a save confirms is the
    /// draft it wrote.
    pub fn edit(&self, data: StepData) -> Result<(), WizardError> {
        if self.is_saving() {
            return Err(WizardError::SaveInFlight);
        }
        let mut state = self.state();
        if data.step() != state.current {
            return Err(WizardError::WrongStep {
                expected: data.step(),
                actual: state.current,
            });
        }
        state.draft.apply(data);
        Ok(())
    }

    /// Jump back to an earlier step. In-memory only: the persisted marker
    /// keeps its value. Refused while a save is running.
    pub fn back(&self, to: WizardStep) -> Result<(), WizardError> {
        if self.is_saving() {
            return Err(WizardError::SaveInFlight);
        }
        let mut state = self.state();
        if to >= state.current {
            return Err(WizardError::InvalidBackTarget {
                from: state.current,
                to,
            });
        }
        state.current = to;
        Ok(())
    }

    /// Validate the current step, save everything up to it, then advance.
    ///
    /// On any failure the current step stays where it is. Leaving the first
    /// step writes the profile (name, avatar) before the verification record;
    /// if the second write fails the profile keeps the new values and the
    /// step does not advance, so a retry rewrites both. That step therefore
    /// costs two persistence calls instead of one.
    pub async fn next(&self) -> Result<WizardStep, WizardError> {
        let _in_flight = InFlight::begin(&self.saving)?;

        let (step, patch, version, personal) = {
            let state = self.state();
            let step = state.current;
            if step == WizardStep::ReviewSubmit {
                return Err(WizardError::WrongStep {
                    expected: WizardStep::Policies,
                    actual: step,
                });
            }
            validate_step(step, &state.draft)?;
            (
                step,
                state.draft.patch_through(step),
                state.persisted.version,
                state.draft.personal.clone(),
            )
        };

        if step == WizardStep::PersonalInfo {
            self.profiles.save_personal(&self.session, &personal).await?;
        }
        let stored = self
            .resolver
            .update_verification(&self.session.user_id, patch, version)
            .await?;
        self.saves.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state();
        state.persisted = stored;
        let advanced = step.next().unwrap_or(WizardStep::ReviewSubmit);
        state.current = advanced;
        tracing::info!(
            seller = %self.session.user_id,
            saved = %step,
            persisted = %state.persisted.completion_step,
            "onboarding step saved"
        );
        Ok(advanced)
    }

    /// Submit the whole profile for review.
    ///
    /// One write sets every section, `profile_completed`, the final
    /// completion marker and `pending` status, whatever the status was.
    pub async fn submit(&self) -> Result<SellerVerification, WizardError> {
        let _in_flight = InFlight::begin(&self.saving)?;

        let (patch, version) = {
            let state = self.state();
            if state.current != WizardStep::ReviewSubmit {
                return Err(WizardError::WrongStep {
                    expected: WizardStep::ReviewSubmit,
                    actual: state.current,
                });
            }
            let previous = state.persisted.status;
            (
                state.draft.review_payload().into_patch(previous),
                state.persisted.version,
            )
        };

        let stored = self
            .resolver
            .update_verification(&self.session.user_id, patch, version)
            .await?;
        self.saves.fetch_add(1, Ordering::SeqCst);

        self.state().persisted = stored.clone();
        tracing::info!(seller = %self.session.user_id, "onboarding submitted for review");
        Ok(stored)
    }

    /// Re-read the stored record after a conflict. The draft and the current
    /// step are kept; only the mirror of the stored record is refreshed.
    pub async fn reload(&self) -> Result<(), WizardError> {
        let _in_flight = InFlight::begin(&self.saving)?;
        let record = self.resolver.ensure_verification(&self.session.user_id).await?;
        self.state().persisted = record;
        Ok(())
    }
}
