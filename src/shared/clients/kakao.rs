use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::shared::config::KakaoConfig;
use crate::shared::errors::AppError;

/// 카카오 프로필 (로그인/회원가입에 필요한 값만)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KakaoProfile {
    /// 카카오 회원번호
    pub external_id: i64,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub age_range: Option<String>,
    /// "male" / "female"
    pub gender: Option<String>,
}

/// 카카오 API 인터페이스
/// Kakao OAuth operations used by the auth flow
#[async_trait]
pub trait KakaoApi: Send + Sync {
    /// 인가 코드 -> 카카오 access token
    async fn exchange_code_for_token(&self, code: &str) -> Result<String, AppError>;

    /// access token 으로 프로필 조회
    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError>;

    /// 앱 연결 끊기 (회원 탈퇴)
    async fn unlink(&self, kakao_id: i64) -> Result<(), AppError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct UserMeResponse {
    id: Option<i64>,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    nickname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    age_range: Option<String>,
    gender: Option<String>,
    profile: Option<Properties>,
}

/// 카카오 API 클라이언트
pub struct KakaoClient {
    http_client: reqwest::Client,
    config: KakaoConfig,
}

impl KakaoClient {
    pub fn new(http_client: reqwest::Client, config: KakaoConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

// 응답 본문은 로그에만 남기고 Internal 로 정규화
async fn provider_failure(operation: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(%status, %body, "kakao {} failed", operation);
    AppError::Internal(format!("kakao {} returned {}", operation, status))
}

fn transport_failure(operation: &str, err: reqwest::Error) -> AppError {
    tracing::error!(error = %err, "kakao {} request failed", operation);
    AppError::Internal(format!("kakao {} request failed: {}", operation, err))
}

#[async_trait]
impl KakaoApi for KakaoClient {
    async fn exchange_code_for_token(&self, code: &str) -> Result<String, AppError> {
        let url = format!("{}/oauth/token", self.config.auth_url);

        let response = self
            .http_client
            .post(&url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("code", code),
            ])
            .send()
            .await
            .map_err(|e| transport_failure("token exchange", e))?;

        if !response.status().is_success() {
            return Err(provider_failure("token exchange", response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| transport_failure("token exchange", e))?;

        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError> {
        if access_token.trim().is_empty() {
            return Err(AppError::Unauthorized("missing kakao access token".to_string()));
        }

        let url = format!("{}/v2/user/me", self.config.api_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport_failure("profile", e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized("kakao rejected access token".to_string()));
        }
        if !response.status().is_success() {
            return Err(provider_failure("profile", response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_failure("profile", e))?;
        if body.trim().is_empty() {
            return Err(AppError::NotFound("empty kakao profile".to_string()));
        }

        let me: UserMeResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, %body, "kakao profile is not valid json");
            AppError::Internal(format!("invalid kakao profile: {}", e))
        })?;

        let external_id = me
            .id
            .ok_or_else(|| AppError::NotFound("kakao profile without id".to_string()))?;
        let account = me.kakao_account.unwrap_or_default();

        // properties.nickname 이 없으면 kakao_account.profile.nickname 사용
        let nickname = me
            .properties
            .and_then(|p| p.nickname)
            .or_else(|| account.profile.and_then(|p| p.nickname));

        Ok(KakaoProfile {
            external_id,
            nickname,
            email: account.email,
            age_range: account.age_range,
            gender: account.gender,
        })
    }

    async fn unlink(&self, kakao_id: i64) -> Result<(), AppError> {
        let url = format!("{}/v1/user/unlink", self.config.api_url);
        let target_id = kakao_id.to_string();

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("KakaoAK {}", self.config.admin_key))
            .form(&[("target_id_type", "user_id"), ("target_id", target_id.as_str())])
            .send()
            .await
            .map_err(|e| transport_failure("unlink", e))?;

        if !response.status().is_success() {
            return Err(provider_failure("unlink", response).await);
        }

        tracing::info!(kakao_id, "kakao account unlinked");
        Ok(())
    }
}
