// ABOUTME: Binding message construction for wallet-to-account linking.
// ABOUTME: The exact text is signed by the wallet and re-verified server-side.

/// Build the message a wallet signs to prove address ownership and bind it to
/// an account.
///
/// Pure function of `(address, user_id)`: the signing step and the submission
/// payload must carry byte-identical text, since the verifier re-checks the
/// signature over the same bytes.
pub fn binding_message(address: &str, user_id: &str) -> String {
    format!(
        "I am linking my Abstract wallet address {} to my account with ID {}.",
        address, user_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_message_exact_text() {
        assert_eq!(
            binding_message("0xABC", "u1"),
            "I am linking my Abstract wallet address 0xABC to my account with ID u1."
        );
    }

    #[test]
    fn test_binding_message_is_deterministic() {
        let first = binding_message("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "user-42");
        let second = binding_message("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "user-42");
        assert_eq!(first, second, "Same inputs should produce same message");
    }
}
