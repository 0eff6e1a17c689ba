// ABOUTME: Remote verifier client for the account-linking endpoint.
// ABOUTME: Submits {userId, address, signature, message} with Bearer auth and reads the validity decision.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sanitize;

const LINK_ENDPOINT_PATH: &str = "/api/auth/linkAbstractAccount";

/// The JSON body the verifier endpoint expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSubmission {
    pub user_id: String,
    pub address: String,
    pub signature: String,
    /// The exact binding message that was signed; the verifier re-checks the
    /// signature over these bytes.
    pub message: String,
}

/// Verifier response: `{valid: boolean, message?: string}`.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    valid: bool,
    message: Option<String>,
}

/// Errors from the verification request.
///
/// `Rejected` carries display-ready text: the verifier's own `message` field
/// when present, an HTTP-status fallback otherwise. Transport and decode
/// failures keep their causes for logging.
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Verification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected verifier response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Rejected(String),
}

/// The remote decision surface: does this signature bind this address to this
/// account?
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Returns `Ok(())` only when the verifier answered `valid: true`.
    async fn verify(
        &self,
        submission: &LinkSubmission,
        auth_token: Option<&str>,
    ) -> Result<(), VerifierError>;
}

/// HTTP client for the real verifier endpoint.
pub struct HttpVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpVerifier {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", api_base_url.trim_end_matches('/'), LINK_ENDPOINT_PATH),
        }
    }

    /// The full endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify(
        &self,
        submission: &LinkSubmission,
        auth_token: Option<&str>,
    ) -> Result<(), VerifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", auth_token.unwrap_or_default()),
            )
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VerifierError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            log::warn!("[verifier] Link request rejected: HTTP {}", status);
            let text = sanitize::message_from_body(&body)
                .unwrap_or_else(|| format!("Verification failed: HTTP {}", status));
            return Err(VerifierError::Rejected(text));
        }

        let decision: VerifyResponse = serde_json::from_value(body)
            .map_err(|e| VerifierError::InvalidResponse(e.to_string()))?;

        if decision.valid {
            log::info!("[verifier] Link accepted for user {}", submission.user_id);
            Ok(())
        } else {
            let text = decision
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            log::warn!("[verifier] Link declined: {}", text);
            Err(VerifierError::Rejected(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let verifier = HttpVerifier::new("https://api.example.com");
        assert_eq!(
            verifier.endpoint(),
            "https://api.example.com/api/auth/linkAbstractAccount"
        );

        let verifier = HttpVerifier::new("https://api.example.com/");
        assert_eq!(
            verifier.endpoint(),
            "https://api.example.com/api/auth/linkAbstractAccount"
        );
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let submission = LinkSubmission {
            user_id: "u1".into(),
            address: "0xABC".into(),
            signature: "0xdead".into(),
            message: "hello".into(),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["address"], "0xABC");
        assert_eq!(json["signature"], "0xdead");
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn test_verify_response_tolerates_missing_fields() {
        let decision: VerifyResponse = serde_json::from_str("{}").unwrap();
        assert!(!decision.valid);
        assert!(decision.message.is_none());
    }
}
