// ABOUTME: Host environment collaborator: navigation, persisted state, reload.
// ABOUTME: The flow only ever clears persisted state wholesale, from the retry action.

use std::path::PathBuf;

/// What the flow needs from its hosting environment.
///
/// In the page rendition these map to `window.location`, cookie/storage
/// clearing, and a full reload. Headless implementations decide what each
/// means for them.
pub trait HostEnvironment: Send + Sync {
    /// Navigate away to `url` (success redirect and manual return).
    fn navigate(&self, url: &str);

    /// Clear every piece of persisted state reachable from this host:
    /// stale wallet sessions and tokens are the presumed cause of most
    /// errors and cannot be repaired in place.
    fn reset_persisted_state(&self) -> Result<(), String>;

    /// Restart the whole flow from input resolution.
    fn reload(&self);
}

/// Process-level environment for the headless CLI.
///
/// Persisted state is a directory of session artifacts under the local data
/// dir; navigation and reload are reported on the log since there is no page
/// to move.
pub struct ProcessEnvironment {
    state_dir: PathBuf,
}

impl ProcessEnvironment {
    const STATE_DIR_NAME: &'static str = "abstract-link";

    pub fn new() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            state_dir: base.join(Self::STATE_DIR_NAME),
        }
    }

    pub fn with_state_dir(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }
}

impl Default for ProcessEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for ProcessEnvironment {
    fn navigate(&self, url: &str) {
        log::info!("[env] Navigating to {}", url);
        println!("Continue at: {}", url);
    }

    fn reset_persisted_state(&self) -> Result<(), String> {
        match std::fs::remove_dir_all(&self.state_dir) {
            Ok(()) => {
                log::info!("[env] Cleared persisted state at {:?}", self.state_dir);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to clear persisted state: {}", e)),
        }
    }

    fn reload(&self) {
        log::info!("[env] Reload requested; re-run the linking flow");
        println!("State cleared. Run the link command again to retry.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_persisted_state_removes_the_state_dir() {
        let dir = std::env::temp_dir().join(format!("abstract-link-test-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sessions")).unwrap();
        std::fs::write(dir.join("sessions").join("wallet.json"), b"{}").unwrap();

        let env = ProcessEnvironment::with_state_dir(dir.clone());
        env.reset_persisted_state().unwrap();

        assert!(!dir.exists());
    }

    #[test]
    fn test_reset_persisted_state_is_ok_when_nothing_persisted() {
        let env = ProcessEnvironment::with_state_dir(
            std::env::temp_dir().join("abstract-link-test-never-created"),
        );
        assert!(env.reset_persisted_state().is_ok());
    }
}
