use std::sync::Arc;

use crate::domains::auth::models::{
    JwtPayload, KakaoCallbackResponse, SigninCredential, SigninRequest, SigninResponse, TokenPair,
};
use crate::domains::auth::services::{HashService, JwtService};
use crate::domains::users::models::{non_empty, Gender, NewUser, ProviderId, SocialType, User};
use crate::shared::clients::{AppleApi, KakaoApi};
use crate::shared::database::{is_unique_violation, UserRepository};
use crate::shared::errors::AppError;

// 인증 서비스
// AuthService: social sign-in, token rotation and account deletion
#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    kakao: Arc<dyn KakaoApi>,
    apple: Arc<dyn AppleApi>,
    jwt_service: JwtService,
    hash_service: HashService,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        kakao: Arc<dyn KakaoApi>,
        apple: Arc<dyn AppleApi>,
        jwt_service: JwtService,
        hash_service: HashService,
    ) -> Self {
        Self {
            user_repository,
            kakao,
            apple,
            jwt_service,
            hash_service,
        }
    }

    /// 카카오 인가 코드로 카카오 access token 발급 (서버 테스트용)
    pub async fn kakao_callback(&self, code: &str) -> Result<KakaoCallbackResponse, AppError> {
        let access_token = self.kakao.exchange_code_for_token(code).await?;
        Ok(KakaoCallbackResponse { access_token })
    }

    /// 로그인/회원가입
    /// 자격 증명 조합은 외부 호출 전에 검증
    pub async fn signin(&self, request: SigninRequest) -> Result<SigninResponse, AppError> {
        match request.validate()? {
            SigninCredential::Kakao { access_token } => self.signin_with_kakao(&access_token).await,
            SigninCredential::Apple { id_token, code } => {
                self.signin_with_apple(&id_token, &code).await
            }
        }
    }

    pub async fn signin_with_kakao(&self, access_token: &str) -> Result<SigninResponse, AppError> {
        if access_token.trim().is_empty() {
            return Err(AppError::Unauthorized("missing kakao access token".to_string()));
        }

        // 1. 카카오 프로필 조회
        let profile = self.kakao.fetch_profile(access_token).await?;
        let provider_id = ProviderId::Kakao(profile.external_id);

        // 2. 기존 사용자 조회, 없으면 생성
        let user = match self.find_by_provider_id(&provider_id).await? {
            Some(user) => user,
            None => {
                let new_user = NewUser {
                    provider_id,
                    name: non_empty(profile.nickname),
                    email: non_empty(profile.email),
                    age_range: non_empty(profile.age_range),
                    gender: profile.gender.as_deref().and_then(Gender::from_provider),
                    apple_refresh_token: None,
                };
                self.create_user(new_user).await?
            }
        };

        // 3. 토큰 발급 + refresh token 해시 저장
        let tokens = self.issue_and_persist(&user).await?;
        tracing::info!(user_id = user.id, social_type = "kakao", "user signed in");

        Ok(SigninResponse::new(tokens, user.id))
    }

    pub async fn signin_with_apple(
        &self,
        id_token: &str,
        code: &str,
    ) -> Result<SigninResponse, AppError> {
        // 1. identity token 검증
        let identity = self.apple.verify_identity_token(id_token).await?;
        let provider_id = ProviderId::Apple(identity.subject);

        // 2. 기존 사용자 조회, 없으면 authorization code 교환 후 생성
        let user = match self.find_by_provider_id(&provider_id).await? {
            Some(user) => user,
            None => {
                let apple_refresh_token = self.apple.exchange_authorization_code(code).await?;
                let new_user = NewUser {
                    provider_id,
                    name: None,
                    email: non_empty(identity.email),
                    age_range: None,
                    gender: None,
                    apple_refresh_token: Some(apple_refresh_token),
                };
                self.create_user(new_user).await?
            }
        };

        let tokens = self.issue_and_persist(&user).await?;
        tracing::info!(user_id = user.id, social_type = "apple", "user signed in");

        Ok(SigninResponse::new(tokens, user.id))
    }

    /// Refresh Token 검증 후 새 토큰 쌍 발급 (Rotation)
    /// 저장된 해시와 일치하는 refresh token 만 한 번 사용 가능
    pub async fn reissue_tokens(
        &self,
        user_id: i64,
        refresh_token: &str,
    ) -> Result<TokenPair, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::database("Failed to fetch user", e))?
            .ok_or_else(|| AppError::Forbidden(format!("user {} not found", user_id)))?;

        let stored_hash = user
            .refresh_token
            .as_deref()
            .ok_or_else(|| AppError::Forbidden(format!("user {} has no refresh token", user_id)))?;

        if !self.hash_service.verify(stored_hash, refresh_token).await {
            tracing::warn!(user_id, "refresh token does not match stored hash");
            return Err(AppError::Forbidden("refresh token mismatch".to_string()));
        }

        let tokens = self.issue_and_persist(&user).await?;
        tracing::debug!(user_id, "tokens reissued");

        Ok(tokens)
    }

    /// 회원 탈퇴: provider 연결 해제 후 논리 삭제
    /// provider 호출이 실패하면 삭제하지 않음
    pub async fn delete_user(&self, caller_id: i64, target_id: i64) -> Result<(), AppError> {
        if caller_id != target_id {
            return Err(AppError::Forbidden(format!(
                "user {} cannot delete user {}",
                caller_id, target_id
            )));
        }

        let user = self
            .user_repository
            .find_by_id(target_id)
            .await
            .map_err(|e| AppError::database("Failed to fetch user", e))?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", target_id)))?;

        match user.social_type {
            SocialType::Kakao => {
                let kakao_id = user.kakao_id.ok_or_else(|| {
                    AppError::Internal(format!("kakao user {} has no kakao id", user.id))
                })?;
                self.kakao.unlink(kakao_id).await?;
            }
            SocialType::Apple => match user.apple_refresh_token.as_deref() {
                Some(token) => self.apple.revoke(token).await?,
                None => tracing::warn!(user_id = user.id, "no apple refresh token, skip revoke"),
            },
        }

        self.user_repository
            .soft_delete(user.id)
            .await
            .map_err(|e| AppError::database("Failed to delete user", e))?;

        tracing::info!(user_id = user.id, "user deleted");
        Ok(())
    }

    async fn find_by_provider_id(&self, provider_id: &ProviderId) -> Result<Option<User>, AppError> {
        self.user_repository
            .find_by_provider_id(provider_id)
            .await
            .map_err(|e| AppError::database("Failed to fetch user by provider id", e))
    }

    // 동시 가입으로 unique index 에 걸리면 먼저 생성된 사용자를 사용
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let provider_id = new_user.provider_id.clone();

        match self.user_repository.create(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, social_type = ?user.social_type, "user created");
                Ok(user)
            }
            Err(e) if is_unique_violation(&e) => self
                .find_by_provider_id(&provider_id)
                .await?
                .ok_or_else(|| AppError::database("Failed to create user", e)),
            Err(e) => Err(AppError::database("Failed to create user", e)),
        }
    }

    /// 토큰 쌍 발급 후 refresh token 해시 저장 (이전 해시 덮어쓰기)
    async fn issue_and_persist(&self, user: &User) -> Result<TokenPair, AppError> {
        let payload = JwtPayload::from_user(user).ok_or_else(|| {
            AppError::Internal(format!("user {} has no provider id", user.id))
        })?;

        let tokens = self.jwt_service.issue_token_pair(&payload).await?;
        let hash = self.hash_service.hash(&tokens.refresh_token).await?;

        self.user_repository
            .update_refresh_token_hash(user.id, &hash)
            .await
            .map_err(|e| AppError::database("Failed to store refresh token", e))?;

        Ok(tokens)
    }
}
