//! The profile accumulator — shared, merge-updatable aggregate state.
//!
//! Step screens read their slice for pre-fill and write validated partial
//! updates back. The merge is shallow across top-level fields and
//! structural for the nested `assets` group: updating one asset bucket
//! never erases its siblings. No validation and no I/O happen here.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::model::{
    Assets, FinancialStatus, InvestmentExperience, InvestmentHorizon, LifeStage,
    OnboardingProfile, RiskTolerance,
};

/// Partial update for the nested `assets` group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetsUpdate {
    pub cash: Option<Decimal>,
    pub stock: Option<Decimal>,
    pub fund: Option<Decimal>,
    pub insurance: Option<Decimal>,
    pub real_estate: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl AssetsUpdate {
    fn apply_to(&self, assets: &mut Assets) {
        if let Some(cash) = self.cash {
            assets.cash = cash;
        }
        if let Some(stock) = self.stock {
            assets.stock = stock;
        }
        if let Some(fund) = self.fund {
            assets.fund = fund;
        }
        if let Some(insurance) = self.insurance {
            assets.insurance = insurance;
        }
        if let Some(real_estate) = self.real_estate {
            assets.real_estate = real_estate;
        }
        if let Some(other) = self.other {
            assets.other = other;
        }
    }

    /// All amounts set in this update, paired with their field names.
    /// Used by step validation for the non-negativity check.
    pub fn amounts(&self) -> [(&'static str, Option<Decimal>); 6] {
        [
            ("assets.cash", self.cash),
            ("assets.stock", self.stock),
            ("assets.fund", self.fund),
            ("assets.insurance", self.insurance),
            ("assets.real_estate", self.real_estate),
            ("assets.other", self.other),
        ]
    }
}

/// A partial record merged into the aggregate. Only `Some` fields are
/// written; everything else keeps its prior value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub life_stage: Option<LifeStage>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub employment_status: Option<String>,
    pub estimated_monthly_income: Option<Decimal>,
    pub basic_salary: Option<Decimal>,

    pub monthly_expenses: Option<Decimal>,
    pub savings: Option<Decimal>,
    pub debt_amount: Option<Decimal>,
    pub debt_type: Option<Vec<String>>,
    pub assets: Option<AssetsUpdate>,
    pub financial_status: Option<FinancialStatus>,
    pub necessary_expenses: Option<Decimal>,

    pub risk_tolerance: Option<RiskTolerance>,
    pub investment_experience: Option<InvestmentExperience>,
    pub preferred_investment_types: Option<Vec<String>>,
    pub investment_horizon: Option<InvestmentHorizon>,

    pub short_term_goal: Option<String>,
    pub mid_term_goal: Option<String>,
    pub long_term_goal: Option<String>,
    pub monthly_investment_amount: Option<Decimal>,
    pub expected_return_rate: Option<Decimal>,
}

impl ProfileUpdate {
    /// Overlay this update onto a profile.
    pub fn apply_to(&self, profile: &mut OnboardingProfile) {
        if let Some(life_stage) = self.life_stage {
            profile.life_stage = life_stage;
        }
        if let Some(ref age_group) = self.age_group {
            profile.age_group = age_group.clone();
        }
        if let Some(ref gender) = self.gender {
            profile.gender = gender.clone();
        }
        if let Some(ref employment_status) = self.employment_status {
            profile.employment_status = employment_status.clone();
        }
        if let Some(income) = self.estimated_monthly_income {
            profile.estimated_monthly_income = income;
        }
        if let Some(basic_salary) = self.basic_salary {
            profile.basic_salary = basic_salary;
        }
        if let Some(monthly_expenses) = self.monthly_expenses {
            profile.monthly_expenses = monthly_expenses;
        }
        if let Some(savings) = self.savings {
            profile.savings = savings;
        }
        if let Some(debt_amount) = self.debt_amount {
            profile.debt_amount = debt_amount;
        }
        if let Some(ref debt_type) = self.debt_type {
            profile.debt_type = debt_type.clone();
        }
        if let Some(ref assets) = self.assets {
            assets.apply_to(&mut profile.assets);
        }
        if let Some(financial_status) = self.financial_status {
            profile.financial_status = financial_status;
        }
        if let Some(necessary_expenses) = self.necessary_expenses {
            profile.necessary_expenses = necessary_expenses;
        }
        if let Some(risk_tolerance) = self.risk_tolerance {
            profile.risk_tolerance = risk_tolerance;
        }
        if let Some(experience) = self.investment_experience {
            profile.investment_experience = experience;
        }
        if let Some(ref types) = self.preferred_investment_types {
            profile.preferred_investment_types = types.clone();
        }
        if let Some(horizon) = self.investment_horizon {
            profile.investment_horizon = horizon;
        }
        if let Some(ref goal) = self.short_term_goal {
            profile.short_term_goal = goal.clone();
        }
        if let Some(ref goal) = self.mid_term_goal {
            profile.mid_term_goal = goal.clone();
        }
        if let Some(ref goal) = self.long_term_goal {
            profile.long_term_goal = goal.clone();
        }
        if let Some(amount) = self.monthly_investment_amount {
            profile.monthly_investment_amount = amount;
        }
        if let Some(rate) = self.expected_return_rate {
            profile.expected_return_rate = rate;
        }
    }
}

/// Cloneable handle to the in-memory aggregate.
///
/// Created with full defaults when the wizard mounts and consumed by the
/// submission coordinator at the final step. It is never written to durable
/// storage before a successful submission — an abandoned wizard loses all
/// entered data.
#[derive(Clone, Default)]
pub struct ProfileAccumulator {
    profile: Arc<RwLock<OnboardingProfile>>,
}

impl ProfileAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial update into the aggregate.
    pub async fn update(&self, update: ProfileUpdate) {
        let mut profile = self.profile.write().await;
        update.apply_to(&mut profile);
    }

    /// Snapshot of the current aggregate.
    pub async fn snapshot(&self) -> OnboardingProfile {
        self.profile.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn starts_at_defaults() {
        let acc = ProfileAccumulator::new();
        assert_eq!(acc.snapshot().await, OnboardingProfile::default());
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let acc = ProfileAccumulator::new();
        let before = acc.snapshot().await;
        acc.update(ProfileUpdate::default()).await;
        assert_eq!(acc.snapshot().await, before);
    }

    #[tokio::test]
    async fn disjoint_updates_overlay_in_order() {
        let acc = ProfileAccumulator::new();

        acc.update(ProfileUpdate {
            life_stage: Some(LifeStage::CareerStart),
            ..Default::default()
        })
        .await;
        acc.update(ProfileUpdate {
            savings: Some(dec!(8000)),
            debt_type: Some(vec!["student_loan".to_string()]),
            ..Default::default()
        })
        .await;

        let snapshot = acc.snapshot().await;
        let mut expected = OnboardingProfile::default();
        expected.life_stage = LifeStage::CareerStart;
        expected.savings = dec!(8000);
        expected.debt_type = vec!["student_loan".to_string()];
        assert_eq!(snapshot, expected);
    }

    #[tokio::test]
    async fn later_update_wins_on_overlap() {
        let acc = ProfileAccumulator::new();
        acc.update(ProfileUpdate {
            monthly_expenses: Some(dec!(1000)),
            ..Default::default()
        })
        .await;
        acc.update(ProfileUpdate {
            monthly_expenses: Some(dec!(2500)),
            ..Default::default()
        })
        .await;
        assert_eq!(acc.snapshot().await.monthly_expenses, dec!(2500));
    }

    #[tokio::test]
    async fn asset_merge_preserves_siblings() {
        let acc = ProfileAccumulator::new();
        acc.update(ProfileUpdate {
            assets: Some(AssetsUpdate {
                cash: Some(dec!(1200)),
                stock: Some(dec!(300)),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await;
        acc.update(ProfileUpdate {
            assets: Some(AssetsUpdate {
                fund: Some(dec!(450)),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await;

        let assets = acc.snapshot().await.assets;
        assert_eq!(assets.cash, dec!(1200));
        assert_eq!(assets.stock, dec!(300));
        assert_eq!(assets.fund, dec!(450));
        assert_eq!(assets.insurance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn update_never_touches_unrelated_groups() {
        let acc = ProfileAccumulator::new();
        acc.update(ProfileUpdate {
            short_term_goal: Some("emergency fund".to_string()),
            ..Default::default()
        })
        .await;

        let snapshot = acc.snapshot().await;
        assert_eq!(snapshot.life_stage, LifeStage::default());
        assert_eq!(snapshot.risk_tolerance, RiskTolerance::default());
        assert_eq!(snapshot.assets, Assets::default());
        assert_eq!(snapshot.short_term_goal, "emergency fund");
    }

    #[tokio::test]
    async fn clones_share_the_aggregate() {
        let acc = ProfileAccumulator::new();
        let handle = acc.clone();
        handle
            .update(ProfileUpdate {
                gender: Some("male".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(acc.snapshot().await.gender, "male");
    }
}
