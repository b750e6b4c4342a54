use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::config::AppleConfig;
use crate::shared::errors::AppError;

/// identity token 발급자
pub const APPLE_ISSUER: &str = "https://appleid.apple.com";

/// client secret(JWT) 유효 시간 (초)
const CLIENT_SECRET_TTL_SECS: i64 = 300;

/// 검증된 애플 identity token 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleIdentity {
    /// 애플 사용자 고유 ID (sub)
    pub subject: String,
    pub email: Option<String>,
}

/// 애플 로그인 API 인터페이스
/// Sign in with Apple operations used by the auth flow
#[async_trait]
pub trait AppleApi: Send + Sync {
    /// identity token 서명/발급자/대상 검증
    async fn verify_identity_token(&self, id_token: &str) -> Result<AppleIdentity, AppError>;

    /// authorization code -> 애플 refresh token
    async fn exchange_authorization_code(&self, code: &str) -> Result<String, AppError>;

    /// 애플 refresh token 폐기 (회원 탈퇴)
    async fn revoke(&self, refresh_token: &str) -> Result<(), AppError>;
}

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClientSecretClaims<'a> {
    iss: &'a str,
    iat: i64,
    exp: i64,
    aud: &'a str,
    sub: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    refresh_token: Option<String>,
}

/// 애플 로그인 클라이언트
pub struct AppleClient {
    http_client: reqwest::Client,
    config: AppleConfig,
}

impl AppleClient {
    pub fn new(http_client: reqwest::Client, config: AppleConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// client secret 생성 (ES256, 호출마다 새로 서명)
    /// Fresh client assertion for the token and revoke endpoints
    pub fn client_secret(&self) -> Result<String, AppError> {
        let pem = self
            .config
            .private_key_pem
            .as_deref()
            .ok_or_else(|| AppError::Internal("apple private key is not configured".to_string()))?;

        let key = EncodingKey::from_ec_pem(pem)
            .map_err(|e| AppError::Internal(format!("invalid apple private key: {}", e)))?;

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.config.key_id.clone());

        let now = Utc::now().timestamp();
        let claims = ClientSecretClaims {
            iss: &self.config.team_id,
            iat: now,
            exp: now + CLIENT_SECRET_TTL_SECS,
            aud: APPLE_ISSUER,
            sub: &self.config.client_id,
        };

        encode(&header, &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to sign apple client secret: {}", e)))
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AppError> {
        let url = format!("{}/auth/keys", self.config.auth_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failure("keys", e))?;

        if !response.status().is_success() {
            return Err(provider_failure("keys", response).await);
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| transport_failure("keys", e))
    }
}

async fn provider_failure(operation: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(%status, %body, "apple {} failed", operation);
    AppError::Internal(format!("apple {} returned {}", operation, status))
}

fn transport_failure(operation: &str, err: reqwest::Error) -> AppError {
    tracing::error!(error = %err, "apple {} request failed", operation);
    AppError::Internal(format!("apple {} request failed: {}", operation, err))
}

fn rejected(reason: String) -> AppError {
    tracing::warn!(%reason, "apple identity token rejected");
    AppError::Unauthorized(reason)
}

#[async_trait]
impl AppleApi for AppleClient {
    async fn verify_identity_token(&self, id_token: &str) -> Result<AppleIdentity, AppError> {
        let header = decode_header(id_token)
            .map_err(|e| rejected(format!("malformed identity token header: {}", e)))?;
        let kid = header
            .kid
            .clone()
            .ok_or_else(|| rejected("identity token without kid".to_string()))?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| rejected(format!("unknown apple key id: {}", kid)))?;

        // JWK 에 알고리즘이 명시되어 있으면 header 와 같아야 함
        // 서명용이 아닌 알고리즘(RSA-OAEP 등)은 parse 실패 -> 거절
        if let Some(key_alg) = &jwk.common.key_algorithm {
            let key_alg = key_alg.to_string();
            if key_alg.parse::<Algorithm>().ok() != Some(header.alg) {
                return Err(rejected(format!(
                    "algorithm mismatch: jwk {}, header {:?}",
                    key_alg, header.alg
                )));
            }
        }

        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| rejected(format!("unusable apple key: {}", e)))?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[APPLE_ISSUER]);
        validation.set_audience(&[self.config.client_id.as_str()]);

        let data = decode::<IdentityClaims>(id_token, &key, &validation)
            .map_err(|e| rejected(format!("invalid identity token: {}", e)))?;

        Ok(AppleIdentity {
            subject: data.claims.sub,
            email: data.claims.email.filter(|e| !e.is_empty()),
        })
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<String, AppError> {
        let client_secret = self.client_secret()?;
        let url = format!("{}/auth/token", self.config.auth_url);

        let response = self
            .http_client
            .post(&url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| transport_failure("token", e))?;

        if !response.status().is_success() {
            return Err(provider_failure("token", response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| transport_failure("token", e))?;

        token
            .refresh_token
            .ok_or_else(|| AppError::Internal("apple token response without refresh_token".to_string()))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        let client_secret = self.client_secret()?;
        let url = format!("{}/auth/revoke", self.config.auth_url);

        let response = self
            .http_client
            .post(&url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("token", refresh_token),
                ("token_type_hint", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| transport_failure("revoke", e))?;

        if !response.status().is_success() {
            return Err(provider_failure("revoke", response).await);
        }

        tracing::info!("apple refresh token revoked");
        Ok(())
    }
}
