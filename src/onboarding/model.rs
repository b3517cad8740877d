//! The onboarding profile aggregate and its enumerated field types.
//!
//! Every field has a complete default from process start — no step screen
//! can ever observe a partial/undefined aggregate. Enum-valued fields are
//! closed types with an `Unknown` fallback so an invalid value is caught by
//! local validation instead of being forwarded to the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Life stage of the user — the anchor of the demographics slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Student,
    FreshGraduate,
    CareerStart,
    CareerGrowth,
    Single,
    Relationship,
    Married,
    Parent,
    Midlife,
    Retirement,
    /// Fallback for values this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl LifeStage {
    pub const ALL: [LifeStage; 10] = [
        Self::Student,
        Self::FreshGraduate,
        Self::CareerStart,
        Self::CareerGrowth,
        Self::Single,
        Self::Relationship,
        Self::Married,
        Self::Parent,
        Self::Midlife,
        Self::Retirement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::FreshGraduate => "fresh_graduate",
            Self::CareerStart => "career_start",
            Self::CareerGrowth => "career_growth",
            Self::Single => "single",
            Self::Relationship => "relationship",
            Self::Married => "married",
            Self::Parent => "parent",
            Self::Midlife => "midlife",
            Self::Retirement => "retirement",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for LifeStage {
    // Non-empty sentinel: downstream logic never sees an empty stage.
    fn default() -> Self {
        Self::CareerGrowth
    }
}

impl std::fmt::Display for LifeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LifeStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or(())
    }
}

/// Risk tolerance for investments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
    #[serde(other)]
    Unknown,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [Self::Conservative, Self::Moderate, Self::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for RiskTolerance {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskTolerance {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// Prior investment experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentExperience {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(other)]
    Unknown,
}

impl InvestmentExperience {
    pub const ALL: [InvestmentExperience; 3] =
        [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for InvestmentExperience {
    fn default() -> Self {
        Self::Beginner
    }
}

impl std::fmt::Display for InvestmentExperience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvestmentExperience {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// How long the user plans to stay invested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentHorizon {
    Short,
    Medium,
    Long,
    #[serde(other)]
    Unknown,
}

impl InvestmentHorizon {
    pub const ALL: [InvestmentHorizon; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for InvestmentHorizon {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for InvestmentHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvestmentHorizon {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// Self-described spending level. Drives the expense-ratio band used when
/// deriving `necessary_expenses` from the estimated salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    /// Scrimping; most of the income goes to essentials.
    Frugal,
    /// Getting by, little left over.
    GettingBy,
    /// A small monthly surplus.
    Surplus,
    /// Comfortable with room for discretionary spending.
    Quality,
    /// High discretionary income.
    Premium,
    #[serde(other)]
    Unknown,
}

impl FinancialStatus {
    pub const ALL: [FinancialStatus; 5] = [
        Self::Frugal,
        Self::GettingBy,
        Self::Surplus,
        Self::Quality,
        Self::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frugal => "frugal",
            Self::GettingBy => "getting_by",
            Self::Surplus => "surplus",
            Self::Quality => "quality",
            Self::Premium => "premium",
            Self::Unknown => "unknown",
        }
    }

    /// The (min, max) share of income spent on essentials for this level.
    /// Levels without a defined band fall back to the surplus band.
    pub fn expense_ratio(&self) -> (Decimal, Decimal) {
        use rust_decimal_macros::dec;
        match self {
            Self::Frugal => (dec!(0.6), dec!(0.8)),
            Self::Quality => (dec!(0.3), dec!(0.4)),
            Self::Premium => (dec!(0.2), dec!(0.3)),
            Self::Surplus | Self::GettingBy | Self::Unknown => (dec!(0.4), dec!(0.6)),
        }
    }
}

impl Default for FinancialStatus {
    fn default() -> Self {
        Self::Surplus
    }
}

impl std::fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FinancialStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// Fixed-shape asset breakdown. Each bucket is a non-negative amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    pub cash: Decimal,
    pub stock: Decimal,
    pub fund: Decimal,
    pub insurance: Decimal,
    pub real_estate: Decimal,
    pub other: Decimal,
}

/// The aggregate accumulated across all wizard steps and submitted as one
/// JSON object to `POST /v1/onboarding`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    // Identity / demographics
    pub life_stage: LifeStage,
    pub age_group: String,
    pub gender: String,
    pub employment_status: String,
    pub estimated_monthly_income: Decimal,
    pub basic_salary: Decimal,

    // Financial snapshot
    pub monthly_expenses: Decimal,
    pub savings: Decimal,
    pub debt_amount: Decimal,
    pub debt_type: Vec<String>,
    pub assets: Assets,
    pub financial_status: FinancialStatus,
    pub necessary_expenses: Decimal,

    // Investment preferences
    pub risk_tolerance: RiskTolerance,
    pub investment_experience: InvestmentExperience,
    pub preferred_investment_types: Vec<String>,
    pub investment_horizon: InvestmentHorizon,

    // Goals
    pub short_term_goal: String,
    pub mid_term_goal: String,
    pub long_term_goal: String,
    pub monthly_investment_amount: Decimal,
    pub expected_return_rate: Decimal,
}
