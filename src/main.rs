// ABOUTME: Headless CLI driver for the Abstract wallet linking flow.
// ABOUTME: Takes the link URL, signs with a local key and reports the outcome.

use std::sync::Arc;

use anyhow::{Context, bail};
use url::Url;

use abstract_link::{
    FlowState, HttpVerifier, LinkConfig, LinkFlow, LocalKeyConnector, ProcessEnvironment,
};

const WALLET_KEY_VAR: &str = "ABSTRACT_WALLET_KEY";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(raw_url) = std::env::args().nth(1) else {
        eprintln!("Usage: abstract-link <link-url>");
        eprintln!("  e.g. abstract-link 'https://link.example.com/?userId=u1&jwt=...'");
        std::process::exit(2);
    };
    let entry_url = Url::parse(&raw_url).context("Invalid link URL")?;

    let config = LinkConfig::from_env()?;
    let private_key = std::env::var(WALLET_KEY_VAR)
        .with_context(|| format!("{} is not set", WALLET_KEY_VAR))?;

    let connector = LocalKeyConnector::from_key(&private_key)?;
    let verifier = HttpVerifier::new(&config.api_base_url);
    let environment = Arc::new(ProcessEnvironment::new());

    let mut flow = LinkFlow::new(config, &entry_url, connector, verifier, environment);
    flow.on_transition(|state| match state {
        FlowState::Signing => println!("Signing message..."),
        FlowState::Success => {
            println!("Abstract Account Linked");
            println!("Redirecting in 3 seconds...");
        }
        FlowState::Loading | FlowState::Error => {}
    });

    println!("Linking Abstract Account...");
    match flow.run().await {
        FlowState::Success => {
            if let Some(redirect) = flow.take_redirect() {
                redirect.join().await;
            }
            Ok(())
        }
        FlowState::Error => {
            eprintln!(
                "Error: {}",
                flow.error_message().unwrap_or_else(|| "Unknown error".to_string())
            );
            std::process::exit(1);
        }
        state => bail!("Flow ended without a terminal state: {}", state.as_str()),
    }
}
