// ABOUTME: Environment-provided configuration for the linking flow.
// ABOUTME: Resolves the host application and verifier API base URLs.

use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the host application base URL.
pub const APP_URL_VAR: &str = "ABSTRACT_LINK_APP_URL";
/// Environment variable naming the verifier API base URL.
pub const API_URL_VAR: &str = "ABSTRACT_LINK_API_URL";

/// How long the flow waits in `Success` before navigating away.
const REDIRECT_DELAY_SECS: u64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
}

/// Base URLs and timing for one linking flow.
///
/// Both URLs are external configuration; the flow never derives them from
/// page input.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Host application base URL (redirect target lives under it).
    pub app_base_url: String,
    /// Verifier API base URL.
    pub api_base_url: String,
    /// Delay before the automatic success redirect fires.
    pub redirect_delay: Duration,
}

impl LinkConfig {
    pub fn new(app_base_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            app_base_url: app_base_url.into(),
            api_base_url: api_base_url.into(),
            redirect_delay: Duration::from_secs(REDIRECT_DELAY_SECS),
        }
    }

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = std::env::var(APP_URL_VAR).map_err(|_| ConfigError::MissingVar(APP_URL_VAR))?;
        let api = std::env::var(API_URL_VAR).map_err(|_| ConfigError::MissingVar(API_URL_VAR))?;
        Ok(Self::new(app, api))
    }

    /// Where both the timed success redirect and the manual return action go.
    pub fn return_url(&self) -> String {
        format!("{}?page=profile", self.app_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_url_points_at_profile_page() {
        let config = LinkConfig::new("https://app.example.com", "https://api.example.com");
        assert_eq!(config.return_url(), "https://app.example.com?page=profile");
    }

    #[test]
    fn test_return_url_tolerates_trailing_slash() {
        let config = LinkConfig::new("https://app.example.com/", "https://api.example.com");
        assert_eq!(config.return_url(), "https://app.example.com?page=profile");
    }

    #[test]
    fn test_default_redirect_delay_is_three_seconds() {
        let config = LinkConfig::new("a", "b");
        assert_eq!(config.redirect_delay, Duration::from_secs(3));
    }
}
