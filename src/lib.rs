// ABOUTME: Core library for linking an Abstract wallet address to an existing account.
// ABOUTME: Sequences wallet connect, binding-message signing, backend verification and redirects.

pub mod config;
pub mod environment;
pub mod error;
pub mod flow;
pub mod message;
pub mod params;
pub mod redirect;
pub mod sanitize;
pub mod verifier;
pub mod wallet;

pub use config::{ConfigError, LinkConfig};
pub use environment::{HostEnvironment, ProcessEnvironment};
pub use error::LinkError;
pub use flow::{FlowState, LinkFlow};
pub use params::LinkRequest;
pub use redirect::RedirectHandle;
pub use verifier::{HttpVerifier, LinkSubmission, Verifier, VerifierError};
pub use wallet::{ConnectorError, LocalKeyConnector, WalletConnector};
