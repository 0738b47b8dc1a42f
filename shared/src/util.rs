use ring::rand::{SecureRandom, SystemRandom};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh entity ID (UUIDv4, hyphenated lowercase).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate an invite token: 24 CSPRNG bytes, hex-encoded (48 chars).
///
/// The token is the client's entire credential and must be unguessable.
/// Falls back to a UUID pair only if the system RNG is unavailable.
pub fn invite_token() -> String {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 24];
    match rng.fill(&mut bytes) {
        Ok(()) => hex::encode(bytes),
        Err(_) => format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_token_shape() {
        let token = invite_token();
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_invite_tokens_unique() {
        let a = invite_token();
        let b = invite_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_now_millis_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }
}
