//! Configuration types.

use crate::error::ConfigError;

/// Path of the onboarding submission endpoint, relative to `api_url`.
pub const ONBOARDING_PATH: &str = "/v1/onboarding";

/// Path of the assistant chat-completions endpoint, relative to `api_url`.
pub const CHAT_COMPLETIONS_PATH: &str = "/v3/chat/completions";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub api_url: String,
    /// City used in the income-estimation prompt.
    pub estimation_city: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001/api".to_string(),
            estimation_city: "Shenzhen".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the config from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// - `WEALTH_ONBOARD_API_URL` — backend base URL
    /// - `WEALTH_ONBOARD_CITY` — city for income estimation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_url = match std::env::var("WEALTH_ONBOARD_API_URL") {
            Ok(url) => {
                let url = url.trim_end_matches('/').to_string();
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        key: "WEALTH_ONBOARD_API_URL".to_string(),
                        message: "expected an http(s) URL".to_string(),
                    });
                }
                url
            }
            Err(_) => defaults.api_url,
        };
        Ok(Self {
            api_url,
            estimation_city: std::env::var("WEALTH_ONBOARD_CITY")
                .unwrap_or(defaults.estimation_city),
        })
    }

    /// Full URL of the onboarding submission endpoint.
    pub fn onboarding_url(&self) -> String {
        format!("{}{}", self.api_url, ONBOARDING_PATH)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn chat_completions_url(&self) -> String {
        format!("{}{}", self.api_url, CHAT_COMPLETIONS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints() {
        let config = AppConfig::default();
        assert_eq!(
            config.onboarding_url(),
            "http://localhost:3001/api/v1/onboarding"
        );
        assert_eq!(
            config.chat_completions_url(),
            "http://localhost:3001/api/v3/chat/completions"
        );
    }
}
