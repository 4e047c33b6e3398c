//! Password gate.
//!
//! A plaintext comparison against one shared secret. No hashing, rate
//! limiting or session expiry: this only keeps casual viewers out.

/// Compare the entered password with the configured secret.
pub fn check_password(candidate: &str, expected: &str) -> bool {
    candidate == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_password() {
        assert!(check_password("secret", "secret"));
        assert!(!check_password("wrong", "secret"));
        assert!(!check_password("Secret", "secret"));
        assert!(!check_password("", "secret"));
    }
}
