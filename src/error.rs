//! Error types for the onboarding pipeline.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Step validation error: {0}")]
    Step(#[from] StepError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the backend HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401 — the session token is missing or expired.
    #[error("Unauthorized (401)")]
    Unauthorized,

    /// Non-2xx, non-401 status, with the server's `error` detail if the
    /// body carried one.
    #[error("Request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response (DNS, connect, timeout...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Local validation errors raised by step forms before anything reaches
/// the accumulator or the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("Required field is missing: {field}")]
    MissingField { field: &'static str },

    #[error("Amount must be non-negative: {field}")]
    NegativeAmount { field: &'static str },

    #[error("Unrecognized value for {field}")]
    UnknownValue { field: &'static str },

    #[error("Form is for step {form}, wizard is at step {current}")]
    StepMismatch {
        form: &'static str,
        current: &'static str,
    },

    #[error("Step {step} cannot be skipped")]
    SkipUnavailable { step: &'static str },

    #[error("The wizard has no further steps")]
    AtEnd,
}

/// Outcomes of a failed submission attempt. All variants are recovered at
/// the coordinator boundary; none are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// No session token at submission time. Recovered by a login redirect;
    /// the aggregate is preserved.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The API returned 401 — the only signal used to infer expiry.
    #[error("Session expired")]
    SessionExpired,

    /// Business-level rejection: a well-formed response with
    /// `success: false`. The message is the server's, surfaced verbatim.
    #[error("Submission rejected: {message}")]
    Rejected { message: String },

    /// Transport-level failure: network error or non-401 non-2xx status.
    #[error("Submission failed: {detail}")]
    Transport { detail: String },

    /// Another submission is already in flight; the action is gated.
    #[error("A submission is already in progress")]
    InFlight,
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
