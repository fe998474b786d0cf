//! JWT 工具
//!
//! 令牌由外部认证方签发（共享 HS256 密钥），本服务只做校验。
//! `generate_token` 仅用于测试和本地联调。

use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体（外部会话提供方约定的载荷）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,          // Subject (user ID)
    pub role: String,         // 用户角色: "professor" 或 "student"
    pub name: Option<String>, // 展示名称
    pub exp: usize,           // Expiration time (时间戳)
    pub iat: usize,           // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Token（测试与本地联调用）
    pub fn generate_token(
        user_id: i64,
        role: &str,
        name: Option<&str>,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            name: name.map(|n| n.to_string()),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token =
            JwtUtils::generate_token(42, "professor", Some("张教授"), chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "professor");
        assert_eq!(claims.name.as_deref(), Some("张教授"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            JwtUtils::generate_token(1, "student", None, chrono::Duration::seconds(-3600)).unwrap();
        assert!(JwtUtils::verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(JwtUtils::verify_token("not-a-jwt").is_err());
    }
}
