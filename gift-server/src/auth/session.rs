//! 管理端会话令牌服务
//!
//! 处理会话令牌的签发、验证和提取。登录端点用共享密钥换取一枚
//! 有时效的 HS256 令牌，替代全局 "已认证" cookie 标志。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "admin_session";

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 签名密钥 (应至少 32 字节)
    pub secret: String,
    /// 会话时效 (分钟)
    pub ttl_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => {
                tracing::warn!("SESSION_SECRET too short (min 32 chars), generating one");
                generate_session_secret()
            }
            Err(_) => {
                // Per-process key: sessions do not survive a restart, which
                // is acceptable for an operator dashboard
                tracing::warn!("SESSION_SECRET not set, generating a per-process key");
                generate_session_secret()
            }
        };

        Self {
            secret,
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(720), // 默认 12 小时
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "gift-server".to_string()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "gift-admin".to_string()),
        }
    }
}

/// 存储在令牌中的会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 主体 (固定为 "admin")
    pub sub: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("session token expired")]
    ExpiredToken,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// 生成安全的会话密钥 (hex, 64 字符)
fn generate_session_secret() -> String {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    if rng.fill(&mut key).is_err() {
        // ring treats RNG failure as effectively impossible; fall back to
        // a UUID pair rather than abort startup
        return format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
    }
    hex::encode(key)
}

/// 会话令牌服务
#[derive(Clone)]
pub struct SessionService {
    pub config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

// 手写 Debug：不输出密钥材料
impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("ttl_minutes", &self.config.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 签发一枚管理会话令牌
    pub fn issue(&self) -> Result<String, SessionError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.ttl_minutes);

        let claims = SessionClaims {
            sub: "admin".to_string(),
            token_type: "admin_session".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                    _ => SessionError::InvalidToken(e.to_string()),
                }
            })?;

        if token_data.claims.token_type != "admin_session" {
            return Err(SessionError::InvalidToken("wrong token type".to_string()));
        }

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_bearer(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// 从 Cookie 头提取会话令牌
    pub fn extract_cookie(cookie_header: &str) -> Option<&str> {
        cookie_header
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix("admin_session="))
            .filter(|v| !v.is_empty())
    }

    /// 构造 Set-Cookie 值 (HttpOnly, SameSite=Lax; 生产环境加 Secure)
    pub fn cookie_for(&self, token: &str, secure: bool) -> String {
        let max_age = self.config.ttl_minutes * 60;
        let mut cookie =
            format!("{SESSION_COOKIE}={token}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax");
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(ttl_minutes: i64) -> SessionService {
        SessionService::new(SessionConfig {
            secret: "0123456789abcdef0123456789abcdef".to_string(),
            ttl_minutes,
            issuer: "gift-server".to_string(),
            audience: "gift-admin".to_string(),
        })
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let service = test_service(60);
        let token = service.issue().unwrap();
        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.token_type, "admin_session");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service(-5);
        let token = service.issue().unwrap();
        let err = service.validate(&token).unwrap_err();
        assert!(matches!(err, SessionError::ExpiredToken));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service(60);
        let token = service.issue().unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.validate(&tampered).is_err());

        // token signed with a different key
        let other = SessionService::new(SessionConfig {
            secret: "ffffffffffffffffffffffffffffffff".to_string(),
            ttl_minutes: 60,
            issuer: "gift-server".to_string(),
            audience: "gift-admin".to_string(),
        });
        let foreign = other.issue().unwrap();
        assert!(service.validate(&foreign).is_err());
    }

    #[test]
    fn test_cookie_extraction() {
        assert_eq!(
            SessionService::extract_cookie("admin_session=abc123"),
            Some("abc123")
        );
        assert_eq!(
            SessionService::extract_cookie("theme=dark; admin_session=abc123; lang=en"),
            Some("abc123")
        );
        assert_eq!(SessionService::extract_cookie("theme=dark"), None);
        assert_eq!(SessionService::extract_cookie("admin_session="), None);
    }

    #[test]
    fn test_cookie_for_attributes() {
        let service = test_service(720);
        let cookie = service.cookie_for("tok", false);
        assert!(cookie.starts_with("admin_session=tok; Max-Age=43200"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
        assert!(service.cookie_for("tok", true).contains("; Secure"));
    }
}
