//! Seller onboarding wizard.
//!
//! Four ordered steps collect a seller's profile:
//! 1. **PersonalInfo**: display name, phone, avatar.
//! 2. **StoreDetails**: business identity, contacts, address, artwork.
//! 3. **Policies**: return and shipping policy text.
//! 4. **ReviewSubmit**: store visibility, then the final submission.
//!
//! Progress is saved only when the seller moves forward, so a reload resumes
//! one step past the last saved one with earlier steps pre-filled.

pub mod error;
pub mod form;
pub mod profile;
pub mod steps;
pub mod validation;
pub mod wizard;

pub use error::WizardError;
pub use form::{Policies, PersonalInfo, ReviewChoices, ReviewPayload, StepData, StoreDetails, WizardDraft};
pub use profile::ProfileSync;
pub use steps::WizardStep;
pub use validation::Field;
pub use wizard::WizardController;
