//! Backend API client — the wire layer for onboarding submission and
//! assistant chat completions.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::onboarding::model::OnboardingProfile;

/// Business-level response body of the onboarding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Business-level outcome of a submission, distinct from transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `success: true` — the profile was persisted server-side.
    Accepted,
    /// `success: false` — the server rejected the payload with a message.
    Rejected { message: String },
}

/// A chat message for the assistant endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The backend API surface the pipeline depends on. Trait object so the
/// coordinator and estimator can be exercised without a server.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// POST the full profile to the onboarding endpoint.
    ///
    /// Returns the business-level outcome for any 2xx response; 401 maps
    /// to [`ApiError::Unauthorized`], other failures to their transport
    /// variants.
    async fn submit_onboarding(
        &self,
        profile: &OnboardingProfile,
        token: &SecretString,
    ) -> Result<SubmitOutcome, ApiError>;

    /// Run a chat completion and return the assistant's reply content.
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        token: &SecretString,
    ) -> Result<String, ApiError>;
}

/// reqwest-backed implementation of [`BackendApi`].
pub struct HttpBackend {
    config: AppConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Pull the `error` field out of a non-2xx body, if there is one.
    async fn error_detail(resp: reqwest::Response) -> Option<String> {
        let body: serde_json::Value = resp.json().await.ok()?;
        body.get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn submit_onboarding(
        &self,
        profile: &OnboardingProfile,
        token: &SecretString,
    ) -> Result<SubmitOutcome, ApiError> {
        let resp = self
            .client
            .post(self.config.onboarding_url())
            .bearer_auth(token.expose_secret())
            .json(profile)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let detail = Self::error_detail(resp).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body: SubmitResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected {
                message: body
                    .error
                    .unwrap_or_else(|| "Submission rejected".to_string()),
            })
        }
    }

    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        token: &SecretString,
    ) -> Result<String, ApiError> {
        let resp = self
            .client
            .post(self.config.chat_completions_url())
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({ "messages": messages }))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let detail = Self::error_detail(resp).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        body.pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}
