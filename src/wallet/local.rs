// ABOUTME: Private-key-backed wallet connector for headless linking.
// ABOUTME: SECURITY: Private keys are NEVER logged or included in error messages.

use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{ConnectorError, WalletConnector};

/// A wallet connector backed by a local private key.
///
/// Stand-in for the provider SDK in headless runs and tests: `login()` opens
/// the session immediately and the address derives from the key. Signing uses
/// EIP-191 personal-message signing, matching what the verifier recovers.
pub struct LocalKeyConnector {
    signer: PrivateKeySigner,
    connected: AtomicBool,
}

// Custom Debug impl that doesn't expose the private key
impl fmt::Debug for LocalKeyConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyConnector")
            .field("address", &self.signer.address())
            .field("connected", &self.connected.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl LocalKeyConnector {
    /// Create a connector from a hex-encoded private key (with or without 0x
    /// prefix).
    ///
    /// # Security
    /// - The private key is NOT logged even on error
    pub fn from_key(private_key: &str) -> Result<Self, ConnectorError> {
        let key = private_key.trim();
        if key.is_empty() {
            return Err(ConnectorError::InvalidPrivateKey);
        }

        // Normalize: ensure 0x prefix
        let key_normalized = if key.starts_with("0x") || key.starts_with("0X") {
            key.to_string()
        } else {
            format!("0x{}", key)
        };

        let signer: PrivateKeySigner = key_normalized
            .parse()
            .map_err(|_| ConnectorError::InvalidPrivateKey)?;

        Ok(Self {
            signer,
            connected: AtomicBool::new(false),
        })
    }
}

#[async_trait::async_trait]
impl WalletConnector for LocalKeyConnector {
    async fn login(&self) -> Result<(), ConnectorError> {
        self.connected.store(true, Ordering::SeqCst);
        log::info!("[wallet] Session opened for {}", self.signer.address());
        Ok(())
    }

    async fn logout(&self) {
        self.connected.store(false, Ordering::SeqCst);
        log::info!("[wallet] Session closed");
    }

    fn address(&self) -> Option<String> {
        if self.connected.load(Ordering::SeqCst) {
            Some(self.signer.address().to_string())
        } else {
            None
        }
    }

    async fn sign_message(&self, message: &str) -> Result<String, ConnectorError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(ConnectorError::NotConnected);
        }

        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ConnectorError::SigningFailed(e.to_string()))?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
