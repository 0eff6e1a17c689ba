// ABOUTME: Wallet connector seam for the linking flow.
// ABOUTME: Defines the session/signing contract and its errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod local;

pub use local::LocalKeyConnector;

/// Errors that can occur during wallet connector operations
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ConnectorError {
    #[error("Invalid private key format")]
    InvalidPrivateKey,

    #[error("Wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("No active wallet session")]
    NotConnected,

    #[error("Signature request rejected")]
    UserRejected,

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// The wallet-provider surface the flow consumes.
///
/// The real provider SDK is an external collaborator; the flow only needs a
/// session it can open and close, an observable address, and session-scoped
/// message signing.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Establish a wallet session. The address becomes observable afterwards.
    async fn login(&self) -> Result<(), ConnectorError>;

    /// Terminate the session so a later retry starts clean.
    async fn logout(&self);

    /// The connected wallet address, if a session is active.
    fn address(&self) -> Option<String>;

    /// Sign a plaintext message with the session wallet.
    ///
    /// # Returns
    /// The signature as a hex string with 0x prefix.
    async fn sign_message(&self, message: &str) -> Result<String, ConnectorError>;
}
