//! Submission coordinator — the single authenticated POST at the end of
//! the wizard.
//!
//! All failure modes are recovered here: missing token and 401 redirect to
//! login, business rejections and transport failures surface a notice and
//! leave the aggregate untouched so the same "submit" action can retry.
//! An in-flight flag gates the action so one user click produces at most
//! one request at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
#[cfg(test)]
use secrecy::SecretString;

use crate::api::{BackendApi, SubmitOutcome};
use crate::error::{ApiError, SubmitError};
use crate::session::SessionStore;
use crate::ui::{Navigator, Notifier, Route};

use super::accumulator::ProfileAccumulator;
use super::estimate::IncomeEstimator;

/// Proof of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub submitted_at: DateTime<Utc>,
}

/// Coordinates the final submission: token precondition, optional income
/// estimation, one POST, and outcome interpretation.
pub struct SubmissionCoordinator {
    api: Arc<dyn BackendApi>,
    session: SessionStore,
    accumulator: ProfileAccumulator,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    estimator: Option<IncomeEstimator>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmissionCoordinator {
    pub fn new(
        api: Arc<dyn BackendApi>,
        session: SessionStore,
        accumulator: ProfileAccumulator,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            accumulator,
            navigator,
            notifier,
            estimator: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Enable income estimation before the POST.
    pub fn with_estimator(mut self, estimator: IncomeEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Whether a submission is currently in flight — the UI disables the
    /// submit action while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard(&self.in_flight))
            .map_err(|_| SubmitError::InFlight)
    }

    /// Submit the full aggregate. Exactly one network POST per call; the
    /// aggregate is never mutated, so a retry after any failure sends the
    /// same payload. Estimation output overlays a local copy of the
    /// snapshot and is never written back.
    pub async fn submit(&self) -> Result<SubmissionReceipt, SubmitError> {
        let _guard = self.begin()?;

        let Some(token) = self.session.token().await else {
            self.notifier.error("Please sign in to continue");
            self.navigator.push(Route::Login);
            return Err(SubmitError::NotAuthenticated);
        };

        let mut profile = self.accumulator.snapshot().await;
        if let Some(ref estimator) = self.estimator {
            match estimator.estimate(&profile, &token).await {
                Ok(update) => update.apply_to(&mut profile),
                Err(e) => return Err(self.fail(e)),
            }
        }

        tracing::info!(life_stage = %profile.life_stage, "Submitting onboarding profile");

        match self.api.submit_onboarding(&profile, &token).await {
            Ok(SubmitOutcome::Accepted) => {
                self.notifier.success("Profile setup complete");
                Ok(SubmissionReceipt {
                    submitted_at: Utc::now(),
                })
            }
            Ok(SubmitOutcome::Rejected { message }) => {
                tracing::warn!(%message, "Onboarding submission rejected");
                self.notifier.error(&message);
                Err(SubmitError::Rejected { message })
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Map an API error to the submit taxonomy, surfacing the notice and
    /// the login redirect where the error calls for one.
    fn fail(&self, err: ApiError) -> SubmitError {
        match err {
            ApiError::Unauthorized => {
                self.notifier.error("Session expired, please sign in again");
                self.navigator.push(Route::Login);
                SubmitError::SessionExpired
            }
            ApiError::Status { status, detail } => {
                let detail =
                    detail.unwrap_or_else(|| format!("server returned status {status}"));
                tracing::warn!(status, %detail, "Onboarding submission failed");
                self.notifier.error(&detail);
                SubmitError::Transport { detail }
            }
            ApiError::Http(detail) | ApiError::InvalidResponse(detail) => {
                tracing::warn!(%detail, "Onboarding submission failed");
                self.notifier
                    .error("Submission failed, please try again");
                SubmitError::Transport { detail }
            }
        }
    }
}
