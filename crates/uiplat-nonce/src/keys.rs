//! Store key builders for nonce records.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the service uses.

/// Logical namespace for all auth-service keys.
const PREFIX: &str = "auth";

/// Key for the record binding a refresh-token nonce to its token hash.
pub fn refresh_nonce(nonce: &str) -> String {
    format!("{PREFIX}:nonce:{nonce}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_nonce_key() {
        assert_eq!(
            refresh_nonce("00ff00ff00ff00ff00ff00ff00ff00ff"),
            "auth:nonce:00ff00ff00ff00ff00ff00ff00ff00ff"
        );
    }
}
