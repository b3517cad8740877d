//! Income estimation — asks the assistant for a baseline salary before
//! submission and derives the necessary-expenses figure from it.
//!
//! The assistant is instructed to embed the estimate in a
//! `<basic_salary>NNN</basic_salary>` marker. A reply without the marker,
//! or an error status from the assistant endpoint, degrades to a zero
//! salary and the submission proceeds. Only a network failure (or a 401)
//! propagates.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use secrecy::SecretString;

use crate::api::{BackendApi, ChatMessage};
use crate::error::ApiError;

use super::accumulator::ProfileUpdate;
use super::model::{FinancialStatus, OnboardingProfile};

static BASIC_SALARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<basic_salary>.*?(\d+).*?</basic_salary>").expect("valid salary marker regex")
});

const ESTIMATION_SYSTEM_PROMPT: &str = "You estimate a baseline monthly salary from a short \
profile. Reply with the amount wrapped in a <basic_salary>NNN</basic_salary> marker, using a \
concrete integer value (for example: 95s cohort + career_start + tier-1 city = \
<basic_salary>15000</basic_salary>).";

/// Estimates the user's baseline salary via the assistant endpoint.
pub struct IncomeEstimator {
    api: Arc<dyn BackendApi>,
    city: String,
}

impl IncomeEstimator {
    pub fn new(api: Arc<dyn BackendApi>, city: impl Into<String>) -> Self {
        Self {
            api,
            city: city.into(),
        }
    }

    /// Run the estimation and return the partial update to overlay on the
    /// submitted payload: `basic_salary`, `estimated_monthly_income`, and
    /// the derived `necessary_expenses`.
    ///
    /// An error status or an unusable reply degrades to a zero salary;
    /// only a network failure or a 401 is returned as an error.
    pub async fn estimate(
        &self,
        profile: &OnboardingProfile,
        token: &SecretString,
    ) -> Result<ProfileUpdate, ApiError> {
        let messages = [
            ChatMessage::system(ESTIMATION_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "I am in the {} age cohort, my life stage is {}, my gender is {}, and I live \
                 in {}. Please estimate my monthly income.",
                profile.age_group, profile.life_stage, profile.gender, self.city
            )),
        ];

        let content = match self.api.chat_completion(&messages, token).await {
            Ok(content) => Some(content),
            Err(e @ (ApiError::Unauthorized | ApiError::Http(_))) => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Income estimation failed; defaulting salary to 0");
                None
            }
        };
        let basic_salary = content
            .as_deref()
            .and_then(extract_basic_salary)
            .unwrap_or(Decimal::ZERO);
        if basic_salary.is_zero() {
            tracing::warn!("No usable salary estimate; defaulting to 0");
        }

        Ok(ProfileUpdate {
            basic_salary: Some(basic_salary),
            estimated_monthly_income: Some(basic_salary),
            necessary_expenses: Some(necessary_expenses(basic_salary, profile.financial_status)),
            ..Default::default()
        })
    }
}

/// Pull the integer out of the `<basic_salary>` marker, if present.
fn extract_basic_salary(content: &str) -> Option<Decimal> {
    let captures = BASIC_SALARY_RE.captures(content)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Necessary expenses = salary times the midpoint of the spending level's
/// expense-ratio band, rounded to a whole amount.
fn necessary_expenses(basic_salary: Decimal, status: FinancialStatus) -> Decimal {
    let (min, max) = status.expense_ratio();
    (basic_salary * (min + max) / dec!(2))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_marker_value() {
        let content = "Based on your profile: <basic_salary>12000</basic_salary> per month.";
        assert_eq!(extract_basic_salary(content), Some(dec!(12000)));
    }

    #[test]
    fn extracts_with_noise_inside_marker() {
        let content = "<basic_salary>about 9500 yuan</basic_salary>";
        assert_eq!(extract_basic_salary(content), Some(dec!(9500)));
    }

    #[test]
    fn missing_marker_yields_none() {
        assert_eq!(extract_basic_salary("no estimate available"), None);
        assert_eq!(extract_basic_salary("<basic_salary></basic_salary>"), None);
    }

    #[test]
    fn necessary_expenses_uses_band_midpoint() {
        // Surplus band is 0.4..0.6, midpoint 0.5.
        assert_eq!(
            necessary_expenses(dec!(10000), FinancialStatus::Surplus),
            dec!(5000)
        );
        // Frugal band is 0.6..0.8, midpoint 0.7.
        assert_eq!(
            necessary_expenses(dec!(10000), FinancialStatus::Frugal),
            dec!(7000)
        );
        // Quality band 0.3..0.4 → 0.35, rounded half away from zero.
        assert_eq!(
            necessary_expenses(dec!(9999), FinancialStatus::Quality),
            dec!(3500)
        );
    }

    #[test]
    fn zero_salary_gives_zero_expenses() {
        assert_eq!(
            necessary_expenses(Decimal::ZERO, FinancialStatus::Premium),
            Decimal::ZERO
        );
    }
}
