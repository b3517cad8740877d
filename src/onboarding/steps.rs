//! Wizard steps — the linear progression and the per-step form contract.
//!
//! Each step screen owns one slice of the aggregate: it pre-fills from a
//! snapshot, gates "next" on its required fields, and hands a validated
//! partial update back to the accumulator. Skipping advances without
//! writing anything; going back never touches the aggregate.

use rust_decimal::Decimal;

use crate::error::StepError;

use super::accumulator::{AssetsUpdate, ProfileAccumulator, ProfileUpdate};
use super::model::{
    FinancialStatus, InvestmentExperience, InvestmentHorizon, LifeStage, OnboardingProfile,
    RiskTolerance,
};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Demographics → LifeStage → FinancialSnapshot →
/// InvestmentPreferences → Goals → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Demographics,
    LifeStage,
    FinancialSnapshot,
    InvestmentPreferences,
    Goals,
    Complete,
}

impl WizardStep {
    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Demographics => Some(LifeStage),
            LifeStage => Some(FinancialSnapshot),
            FinancialSnapshot => Some(InvestmentPreferences),
            InvestmentPreferences => Some(Goals),
            Goals => Some(Complete),
            Complete => None,
        }
    }

    /// The previous step, if any.
    pub fn prev(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Demographics => None,
            LifeStage => Some(Demographics),
            FinancialSnapshot => Some(LifeStage),
            InvestmentPreferences => Some(FinancialSnapshot),
            Goals => Some(InvestmentPreferences),
            Complete => Some(Goals),
        }
    }

    /// Whether this step offers a "skip" action.
    pub fn skippable(&self) -> bool {
        use WizardStep::*;
        matches!(self, Demographics | LifeStage | FinancialSnapshot)
    }

    /// Whether the wizard is done collecting.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demographics => "demographics",
            Self::LifeStage => "life_stage",
            Self::FinancialSnapshot => "financial_snapshot",
            Self::InvestmentPreferences => "investment_preferences",
            Self::Goals => "goals",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The contract every step screen fulfills: read a named slice for
/// pre-fill, gate "next" on required fields, and produce a validated
/// partial update.
pub trait StepForm {
    /// Which wizard step this form belongs to.
    fn step(&self) -> WizardStep;

    /// Whether the slice's required fields are filled — gates "next".
    fn is_complete(&self) -> bool;

    /// Validate the form and produce the partial update for its slice.
    fn validate(&self) -> Result<ProfileUpdate, StepError>;

    /// Build the form pre-filled from the current aggregate, so a user
    /// navigating back sees their prior choices.
    fn prefill(profile: &OnboardingProfile) -> Self
    where
        Self: Sized;
}

fn require_non_negative(
    field: &'static str,
    amount: Option<Decimal>,
) -> Result<Decimal, StepError> {
    let amount = amount.ok_or(StepError::MissingField { field })?;
    if amount.is_sign_negative() {
        return Err(StepError::NegativeAmount { field });
    }
    Ok(amount)
}

/// Step 1: age group and gender.
#[derive(Debug, Clone, Default)]
pub struct DemographicsForm {
    pub age_group: Option<String>,
    pub gender: Option<String>,
}

impl StepForm for DemographicsForm {
    fn step(&self) -> WizardStep {
        WizardStep::Demographics
    }

    fn is_complete(&self) -> bool {
        self.age_group.as_deref().is_some_and(|s| !s.is_empty())
            && self.gender.as_deref().is_some_and(|s| !s.is_empty())
    }

    fn validate(&self) -> Result<ProfileUpdate, StepError> {
        let age_group = self
            .age_group
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(StepError::MissingField { field: "age_group" })?;
        let gender = self
            .gender
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(StepError::MissingField { field: "gender" })?;

        Ok(ProfileUpdate {
            age_group: Some(age_group.to_string()),
            gender: Some(gender.to_string()),
            ..Default::default()
        })
    }

    fn prefill(profile: &OnboardingProfile) -> Self {
        Self {
            age_group: (!profile.age_group.is_empty()).then(|| profile.age_group.clone()),
            gender: (!profile.gender.is_empty()).then(|| profile.gender.clone()),
        }
    }
}

/// Step 2: life stage. "Next" stays disabled until exactly one stage is
/// chosen.
#[derive(Debug, Clone, Default)]
pub struct LifeStageForm {
    pub life_stage: Option<LifeStage>,
}

impl StepForm for LifeStageForm {
    fn step(&self) -> WizardStep {
        WizardStep::LifeStage
    }

    fn is_complete(&self) -> bool {
        self.life_stage
            .is_some_and(|stage| stage != LifeStage::Unknown)
    }

    fn validate(&self) -> Result<ProfileUpdate, StepError> {
        let stage = self.life_stage.ok_or(StepError::MissingField {
            field: "life_stage",
        })?;
        if stage == LifeStage::Unknown {
            return Err(StepError::UnknownValue {
                field: "life_stage",
            });
        }
        Ok(ProfileUpdate {
            life_stage: Some(stage),
            ..Default::default()
        })
    }

    fn prefill(profile: &OnboardingProfile) -> Self {
        Self {
            life_stage: Some(profile.life_stage),
        }
    }
}

/// Step 3: financial snapshot — expenses, savings, debt, assets, and the
/// self-described spending level.
#[derive(Debug, Clone, Default)]
pub struct FinancialSnapshotForm {
    pub monthly_expenses: Option<Decimal>,
    pub savings: Option<Decimal>,
    pub debt_amount: Option<Decimal>,
    pub debt_type: Vec<String>,
    pub assets: AssetsUpdate,
    pub financial_status: Option<FinancialStatus>,
    pub employment_status: Option<String>,
}

impl StepForm for FinancialSnapshotForm {
    fn step(&self) -> WizardStep {
        WizardStep::FinancialSnapshot
    }

    fn is_complete(&self) -> bool {
        self.monthly_expenses.is_some() && self.savings.is_some() && self.debt_amount.is_some()
    }

    fn validate(&self) -> Result<ProfileUpdate, StepError> {
        let monthly_expenses = require_non_negative("monthly_expenses", self.monthly_expenses)?;
        let savings = require_non_negative("savings", self.savings)?;
        let debt_amount = require_non_negative("debt_amount", self.debt_amount)?;

        for (field, amount) in self.assets.amounts() {
            if let Some(amount) = amount {
                if amount.is_sign_negative() {
                    return Err(StepError::NegativeAmount { field });
                }
            }
        }
        if self.financial_status == Some(FinancialStatus::Unknown) {
            return Err(StepError::UnknownValue {
                field: "financial_status",
            });
        }

        Ok(ProfileUpdate {
            monthly_expenses: Some(monthly_expenses),
            savings: Some(savings),
            debt_amount: Some(debt_amount),
            debt_type: Some(self.debt_type.clone()),
            assets: Some(self.assets.clone()),
            financial_status: self.financial_status,
            employment_status: self.employment_status.clone(),
            ..Default::default()
        })
    }

    fn prefill(profile: &OnboardingProfile) -> Self {
        Self {
            monthly_expenses: Some(profile.monthly_expenses),
            savings: Some(profile.savings),
            debt_amount: Some(profile.debt_amount),
            debt_type: profile.debt_type.clone(),
            assets: AssetsUpdate {
                cash: Some(profile.assets.cash),
                stock: Some(profile.assets.stock),
                fund: Some(profile.assets.fund),
                insurance: Some(profile.assets.insurance),
                real_estate: Some(profile.assets.real_estate),
                other: Some(profile.assets.other),
            },
            financial_status: Some(profile.financial_status),
            employment_status: (!profile.employment_status.is_empty())
                .then(|| profile.employment_status.clone()),
        }
    }
}

/// Step 4: investment preferences. The preferred-investment-type tags are
/// inferred from the chosen risk tolerance and experience level.
#[derive(Debug, Clone, Default)]
pub struct InvestmentPreferencesForm {
    pub risk_tolerance: Option<RiskTolerance>,
    pub investment_experience: Option<InvestmentExperience>,
    pub investment_horizon: Option<InvestmentHorizon>,
}

impl InvestmentPreferencesForm {
    /// Derive preferred investment types from risk tolerance and
    /// experience, deduplicated preserving first-seen order.
    fn infer_preferred_types(
        risk: RiskTolerance,
        experience: InvestmentExperience,
    ) -> Vec<String> {
        let mut types: Vec<&str> = Vec::new();
        match risk {
            RiskTolerance::Conservative => types.extend(["deposits", "bonds"]),
            RiskTolerance::Moderate => types.extend(["bonds", "funds"]),
            RiskTolerance::Aggressive => types.extend(["stocks", "funds", "derivatives"]),
            RiskTolerance::Unknown => {}
        }
        match experience {
            InvestmentExperience::Beginner => types.extend(["index_funds", "etfs"]),
            InvestmentExperience::Intermediate => {
                types.extend(["value_stocks", "dividend_stocks"])
            }
            InvestmentExperience::Advanced => types.extend(["growth_stocks", "options"]),
            InvestmentExperience::Unknown => {}
        }

        let mut unique: Vec<String> = Vec::with_capacity(types.len());
        for t in types {
            if !unique.iter().any(|u| u == t) {
                unique.push(t.to_string());
            }
        }
        unique
    }
}

impl StepForm for InvestmentPreferencesForm {
    fn step(&self) -> WizardStep {
        WizardStep::InvestmentPreferences
    }

    fn is_complete(&self) -> bool {
        self.risk_tolerance
            .is_some_and(|v| v != RiskTolerance::Unknown)
            && self
                .investment_experience
                .is_some_and(|v| v != InvestmentExperience::Unknown)
            && self
                .investment_horizon
                .is_some_and(|v| v != InvestmentHorizon::Unknown)
    }

    fn validate(&self) -> Result<ProfileUpdate, StepError> {
        let risk = self.risk_tolerance.ok_or(StepError::MissingField {
            field: "risk_tolerance",
        })?;
        if risk == RiskTolerance::Unknown {
            return Err(StepError::UnknownValue {
                field: "risk_tolerance",
            });
        }
        let experience = self.investment_experience.ok_or(StepError::MissingField {
            field: "investment_experience",
        })?;
        if experience == InvestmentExperience::Unknown {
            return Err(StepError::UnknownValue {
                field: "investment_experience",
            });
        }
        let horizon = self.investment_horizon.ok_or(StepError::MissingField {
            field: "investment_horizon",
        })?;
        if horizon == InvestmentHorizon::Unknown {
            return Err(StepError::UnknownValue {
                field: "investment_horizon",
            });
        }

        Ok(ProfileUpdate {
            risk_tolerance: Some(risk),
            investment_experience: Some(experience),
            investment_horizon: Some(horizon),
            preferred_investment_types: Some(Self::infer_preferred_types(risk, experience)),
            ..Default::default()
        })
    }

    fn prefill(profile: &OnboardingProfile) -> Self {
        Self {
            risk_tolerance: Some(profile.risk_tolerance),
            investment_experience: Some(profile.investment_experience),
            investment_horizon: Some(profile.investment_horizon),
        }
    }
}

/// Step 5: goals and target amounts.
#[derive(Debug, Clone, Default)]
pub struct GoalsForm {
    pub short_term_goal: Option<String>,
    pub mid_term_goal: Option<String>,
    pub long_term_goal: Option<String>,
    pub monthly_investment_amount: Option<Decimal>,
    pub expected_return_rate: Option<Decimal>,
}

impl StepForm for GoalsForm {
    fn step(&self) -> WizardStep {
        WizardStep::Goals
    }

    fn is_complete(&self) -> bool {
        self.short_term_goal
            .as_deref()
            .is_some_and(|s| !s.is_empty())
            && self.monthly_investment_amount.is_some()
            && self.expected_return_rate.is_some()
    }

    fn validate(&self) -> Result<ProfileUpdate, StepError> {
        let short_term = self
            .short_term_goal
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(StepError::MissingField {
                field: "short_term_goal",
            })?;
        let monthly_amount =
            require_non_negative("monthly_investment_amount", self.monthly_investment_amount)?;
        let return_rate = require_non_negative("expected_return_rate", self.expected_return_rate)?;

        Ok(ProfileUpdate {
            short_term_goal: Some(short_term.to_string()),
            mid_term_goal: self.mid_term_goal.clone(),
            long_term_goal: self.long_term_goal.clone(),
            monthly_investment_amount: Some(monthly_amount),
            expected_return_rate: Some(return_rate),
            ..Default::default()
        })
    }

    fn prefill(profile: &OnboardingProfile) -> Self {
        Self {
            short_term_goal: (!profile.short_term_goal.is_empty())
                .then(|| profile.short_term_goal.clone()),
            mid_term_goal: (!profile.mid_term_goal.is_empty())
                .then(|| profile.mid_term_goal.clone()),
            long_term_goal: (!profile.long_term_goal.is_empty())
                .then(|| profile.long_term_goal.clone()),
            monthly_investment_amount: Some(profile.monthly_investment_amount),
            expected_return_rate: Some(profile.expected_return_rate),
        }
    }
}

/// Wizard controller — owns the current step and routes form updates to
/// the shared accumulator.
pub struct Wizard {
    accumulator: ProfileAccumulator,
    step: WizardStep,
}

impl Wizard {
    pub fn new(accumulator: ProfileAccumulator) -> Self {
        Self {
            accumulator,
            step: WizardStep::Demographics,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }

    /// Build the current step's form pre-filled from the aggregate.
    pub async fn prefill<F: StepForm>(&self) -> F {
        F::prefill(&self.accumulator.snapshot().await)
    }

    /// Commit a validated form and advance. The form must belong to the
    /// current step; its update is merged before the step advances.
    pub async fn next<F: StepForm>(&mut self, form: &F) -> Result<WizardStep, StepError> {
        if form.step() != self.step {
            return Err(StepError::StepMismatch {
                form: form.step().as_str(),
                current: self.step.as_str(),
            });
        }
        let update = form.validate()?;
        let next = self.step.next().ok_or(StepError::AtEnd)?;
        self.accumulator.update(update).await;
        self.step = next;
        Ok(next)
    }

    /// Advance without writing anything — the aggregate keeps its prior
    /// or default values for this step's slice.
    pub fn skip(&mut self) -> Result<WizardStep, StepError> {
        if !self.step.skippable() {
            return Err(StepError::SkipUnavailable {
                step: self.step.as_str(),
            });
        }
        let next = self.step.next().ok_or(StepError::AtEnd)?;
        self.step = next;
        Ok(next)
    }

    /// Navigate to the previous step. Never touches the aggregate, so
    /// already-entered data survives back-navigation. Returns false at
    /// the first step.
    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn steps_walk_linearly() {
        use WizardStep::*;
        let expected = [
            LifeStage,
            FinancialSnapshot,
            InvestmentPreferences,
            Goals,
            Complete,
        ];
        let mut current = Demographics;
        for next in expected {
            assert_eq!(current.next(), Some(next));
            assert_eq!(next.prev(), Some(current));
            current = next;
        }
        assert!(current.next().is_none());
        assert!(current.is_terminal());
        assert!(Demographics.prev().is_none());
    }

    #[test]
    fn demographics_gating() {
        let mut form = DemographicsForm::default();
        assert!(!form.is_complete());
        assert_eq!(
            form.validate(),
            Err(StepError::MissingField { field: "age_group" })
        );

        form.age_group = Some("95s".to_string());
        assert!(!form.is_complete());

        form.gender = Some("female".to_string());
        assert!(form.is_complete());
        let update = form.validate().unwrap();
        assert_eq!(update.age_group.as_deref(), Some("95s"));
        assert_eq!(update.gender.as_deref(), Some("female"));
        assert!(update.life_stage.is_none());
    }

    #[test]
    fn life_stage_rejects_unknown() {
        let form = LifeStageForm {
            life_stage: Some(LifeStage::Unknown),
        };
        assert!(!form.is_complete());
        assert_eq!(
            form.validate(),
            Err(StepError::UnknownValue {
                field: "life_stage"
            })
        );
    }

    #[test]
    fn financial_snapshot_rejects_negative_amounts() {
        let form = FinancialSnapshotForm {
            monthly_expenses: Some(dec!(1500)),
            savings: Some(dec!(-1)),
            debt_amount: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Err(StepError::NegativeAmount { field: "savings" })
        );

        let form = FinancialSnapshotForm {
            monthly_expenses: Some(dec!(1500)),
            savings: Some(dec!(100)),
            debt_amount: Some(Decimal::ZERO),
            assets: AssetsUpdate {
                cash: Some(dec!(-5)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Err(StepError::NegativeAmount {
                field: "assets.cash"
            })
        );
    }

    #[test]
    fn preferred_types_inferred_and_deduplicated() {
        let types = InvestmentPreferencesForm::infer_preferred_types(
            RiskTolerance::Aggressive,
            InvestmentExperience::Advanced,
        );
        assert_eq!(
            types,
            ["stocks", "funds", "derivatives", "growth_stocks", "options"]
        );

        // "bonds" appears once even though moderate risk starts with it
        // and conservative would too.
        let types = InvestmentPreferencesForm::infer_preferred_types(
            RiskTolerance::Moderate,
            InvestmentExperience::Beginner,
        );
        assert_eq!(types, ["bonds", "funds", "index_funds", "etfs"]);
    }

    #[tokio::test]
    async fn wizard_next_merges_and_advances() {
        let acc = ProfileAccumulator::new();
        let mut wizard = Wizard::new(acc.clone());

        let form = DemographicsForm {
            age_group: Some("90s".to_string()),
            gender: Some("male".to_string()),
        };
        assert_eq!(wizard.next(&form).await.unwrap(), WizardStep::LifeStage);
        assert_eq!(acc.snapshot().await.age_group, "90s");
    }

    #[tokio::test]
    async fn wizard_rejects_mismatched_form() {
        let mut wizard = Wizard::new(ProfileAccumulator::new());
        let form = GoalsForm::default();
        assert!(matches!(
            wizard.next(&form).await,
            Err(StepError::StepMismatch { .. })
        ));
        assert_eq!(wizard.current_step(), WizardStep::Demographics);
    }

    #[tokio::test]
    async fn skip_is_neutral_on_the_aggregate() {
        let acc = ProfileAccumulator::new();
        let mut wizard = Wizard::new(acc.clone());

        let before = acc.snapshot().await;
        wizard.skip().unwrap();
        wizard.skip().unwrap();
        assert_eq!(acc.snapshot().await, before);
        assert_eq!(wizard.current_step(), WizardStep::FinancialSnapshot);
    }

    #[tokio::test]
    async fn skip_unavailable_on_later_steps() {
        let mut wizard = Wizard::new(ProfileAccumulator::new());
        wizard.skip().unwrap();
        wizard.skip().unwrap();
        wizard.skip().unwrap();
        assert_eq!(wizard.current_step(), WizardStep::InvestmentPreferences);
        assert!(matches!(
            wizard.skip(),
            Err(StepError::SkipUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn back_navigation_is_non_destructive() {
        let acc = ProfileAccumulator::new();
        let mut wizard = Wizard::new(acc.clone());

        let form = DemographicsForm {
            age_group: Some("85s".to_string()),
            gender: Some("other".to_string()),
        };
        wizard.next(&form).await.unwrap();
        let after_entry = acc.snapshot().await;

        assert!(wizard.back());
        assert_eq!(wizard.current_step(), WizardStep::Demographics);
        assert_eq!(acc.snapshot().await, after_entry);

        // Forward again without re-submitting: aggregate unchanged, and
        // the pre-fill still shows the entered values.
        let prefilled: DemographicsForm = wizard.prefill().await;
        assert_eq!(prefilled.age_group.as_deref(), Some("85s"));
        wizard.skip().unwrap();
        assert_eq!(acc.snapshot().await, after_entry);
    }

    #[tokio::test]
    async fn back_stops_at_first_step() {
        let mut wizard = Wizard::new(ProfileAccumulator::new());
        assert!(!wizard.back());
        assert_eq!(wizard.current_step(), WizardStep::Demographics);
    }

    #[tokio::test]
    async fn full_walk_reaches_complete() {
        let acc = ProfileAccumulator::new();
        let mut wizard = Wizard::new(acc.clone());

        wizard
            .next(&DemographicsForm {
                age_group: Some("95s".to_string()),
                gender: Some("female".to_string()),
            })
            .await
            .unwrap();
        wizard
            .next(&LifeStageForm {
                life_stage: Some(LifeStage::CareerStart),
            })
            .await
            .unwrap();
        wizard.skip().unwrap();
        wizard
            .next(&InvestmentPreferencesForm {
                risk_tolerance: Some(RiskTolerance::Conservative),
                investment_experience: Some(InvestmentExperience::Beginner),
                investment_horizon: Some(InvestmentHorizon::Long),
            })
            .await
            .unwrap();
        wizard
            .next(&GoalsForm {
                short_term_goal: Some("build an emergency fund".to_string()),
                monthly_investment_amount: Some(dec!(500)),
                expected_return_rate: Some(dec!(0.04)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(wizard.is_complete());
        let snapshot = acc.snapshot().await;
        assert_eq!(snapshot.life_stage, LifeStage::CareerStart);
        // Skipped financial snapshot: defaults preserved.
        assert_eq!(snapshot.monthly_expenses, Decimal::ZERO);
        assert_eq!(
            snapshot.preferred_investment_types,
            ["deposits", "bonds", "index_funds", "etfs"]
        );
    }
}
