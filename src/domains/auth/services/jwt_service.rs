use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domains::auth::models::jwt::{Claims, JwtPayload, TokenPair};
use crate::shared::config::JwtConfig;
use crate::shared::errors::AppError;

/// 서명 키 + 수명
struct TokenKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_days: i64,
}

impl TokenKey {
    fn new(secret: &str, lifetime_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_days,
        }
    }

    fn sign(&self, payload: &JwtPayload) -> Result<String, AppError> {
        let claims = Claims::new(payload, self.lifetime_days);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "rejected token");
                AppError::Unauthorized(format!("invalid token: {}", e))
            })
    }
}

/// JWT 서비스
/// Signs and verifies access/refresh tokens, each with its own secret
#[derive(Clone)]
pub struct JwtService {
    access: Arc<TokenKey>,
    refresh: Arc<TokenKey>,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access: Arc::new(TokenKey::new(
                &config.access_token_secret,
                config.access_token_expires_days,
            )),
            refresh: Arc::new(TokenKey::new(
                &config.refresh_token_secret,
                config.refresh_token_expires_days,
            )),
        }
    }

    /// Access/Refresh Token 동시 발급
    /// Sign the payload with both keys on the blocking pool, concurrently
    pub async fn issue_token_pair(&self, payload: &JwtPayload) -> Result<TokenPair, AppError> {
        let access_key = self.access.clone();
        let access_payload = payload.clone();
        let access = tokio::task::spawn_blocking(move || access_key.sign(&access_payload));

        let refresh_key = self.refresh.clone();
        let refresh_payload = payload.clone();
        let refresh = tokio::task::spawn_blocking(move || refresh_key.sign(&refresh_payload));

        let (access_token, refresh_token) = tokio::try_join!(access, refresh)
            .map_err(|e| AppError::Internal(format!("Token signing task failed: {}", e)))?;

        Ok(TokenPair {
            access_token: access_token?,
            refresh_token: refresh_token?,
        })
    }

    /// Access Token 검증
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.access.verify(token)
    }

    /// Refresh Token 검증
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.refresh.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::users::models::SocialType;
    use chrono::Utc;

    fn config() -> JwtConfig {
        JwtConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            access_token_expires_days: 10,
            refresh_token_expires_days: 30,
        }
    }

    fn payload() -> JwtPayload {
        JwtPayload {
            id: 7,
            social_type: SocialType::Kakao,
            unique_id: "123456789".to_string(),
        }
    }

    #[tokio::test]
    async fn test_token_pair_round_trip() {
        let service = JwtService::new(&config());
        let tokens = service.issue_token_pair(&payload()).await.unwrap();

        let access = service.verify_access_token(&tokens.access_token).unwrap();
        assert_eq!(access.payload(), payload());

        let refresh = service.verify_refresh_token(&tokens.refresh_token).unwrap();
        assert_eq!(refresh.payload(), payload());
        assert!(refresh.exp > access.exp);
    }

    #[tokio::test]
    async fn test_tokens_are_not_interchangeable() {
        let service = JwtService::new(&config());
        let tokens = service.issue_token_pair(&payload()).await.unwrap();

        assert!(matches!(
            service.verify_access_token(&tokens.refresh_token),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.verify_refresh_token(&tokens.access_token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_reissued_pair_differs_within_same_second() {
        let service = JwtService::new(&config());
        let first = service.issue_token_pair(&payload()).await.unwrap();
        let second = service.issue_token_pair(&payload()).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let service = JwtService::new(&config());
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 7,
            social_type: SocialType::Apple,
            unique_id: "apple-sub".to_string(),
            jti: "expired".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let service = JwtService::new(&config());
        assert!(matches!(
            service.verify_access_token("not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
