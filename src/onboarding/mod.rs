//! Onboarding pipeline — data collection across wizard steps and the
//! final authenticated submission.
//!
//! Step screens accumulate a typed profile in the shared
//! [`accumulator::ProfileAccumulator`]; the [`submit::SubmissionCoordinator`]
//! consumes it exactly once at the final step and interprets the API's
//! verdict (success, expired session, rejection, transport failure).

pub mod accumulator;
pub mod completion;
pub mod estimate;
pub mod model;
pub mod steps;
pub mod submit;

pub use accumulator::{AssetsUpdate, ProfileAccumulator, ProfileUpdate};
pub use completion::CompletionFeedback;
pub use estimate::IncomeEstimator;
pub use model::{
    Assets, FinancialStatus, InvestmentExperience, InvestmentHorizon, LifeStage,
    OnboardingProfile, RiskTolerance,
};
pub use steps::{
    DemographicsForm, FinancialSnapshotForm, GoalsForm, InvestmentPreferencesForm, LifeStageForm,
    StepForm, Wizard, WizardStep,
};
pub use submit::{SubmissionCoordinator, SubmissionReceipt};
