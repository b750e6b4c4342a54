use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::shared::errors::AppError;

/// 해시 서비스 (refresh token 저장용)
/// Argon2id hashing for secrets stored at rest
#[derive(Clone, Default)]
pub struct HashService;

impl HashService {
    pub fn new() -> Self {
        Self
    }

    /// 해시 생성 (PHC 문자열, 랜덤 salt)
    pub async fn hash(&self, secret: &str) -> Result<String, AppError> {
        let secret = secret.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("Failed to hash secret: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// 해시 검증. 불일치나 깨진 해시는 false
    pub async fn verify(&self, hash: &str, candidate: &str) -> bool {
        let hash = hash.to_string();
        let candidate = candidate.to_string();

        let result = tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "stored hash is malformed");
                    return false;
                }
            };

            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .await;

        match result {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "hash verification task failed");
                false
            }
        }
    }
}
