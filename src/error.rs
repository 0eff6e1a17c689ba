// ABOUTME: Terminal error taxonomy for the linking flow.
// ABOUTME: Every failure collapses into the Error state with one of these kinds.

use thiserror::Error;

use crate::wallet::ConnectorError;

/// Why a linking flow ended in the `Error` state.
///
/// The `Display` text is exactly what the front end shows; the variant itself
/// is kept for logging and telemetry. None of these are retried
/// automatically — recovery is only via the explicit user reset.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Missing userId in URL parameters")]
    MissingUserId,

    #[error("Failed to connect Abstract wallet")]
    ConnectionFailed(#[source] ConnectorError),

    #[error("Failed to sign message")]
    SigningFailed(#[source] ConnectorError),

    /// Carries the already-normalized verifier message.
    #[error("{0}")]
    VerificationFailed(String),
}

impl LinkError {
    /// Stable kind label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LinkError::MissingUserId => "missing_input",
            LinkError::ConnectionFailed(_) => "connection_failure",
            LinkError::SigningFailed(_) => "signing_failure",
            LinkError::VerificationFailed(_) => "verification_failure",
        }
    }
}
