use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domains::users::models::SocialType;
use crate::shared::errors::AppError;
use crate::shared::services::AppState;

/// 인증된 사용자 정보 (access token 에서 추출)
/// Authenticated user (access token verified, user still active)
///
/// 사용법:
/// ```rust,ignore
/// pub async fn get_nickname(
///     State(app_state): State<AppState>,
///     user: AuthenticatedUser,
///     ApiPath(id): ApiPath<i64>,
/// ) -> Result<ApiResponse<NicknameResponse>, AppError> {
///     app_state.user_state.user_service.get_nickname(user.id, id).await
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub unique_id: String,
    pub social_type: SocialType,
}

/// refresh token 으로 인증된 사용자 (토큰 재발급 전용)
/// Identity from a refresh token, together with the raw token for rotation
#[derive(Debug, Clone)]
pub struct RefreshTokenUser {
    pub id: i64,
    pub unique_id: String,
    pub social_type: SocialType,
    pub refresh_token: String,
}

/// "Authorization: Bearer <token>" 파싱
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Expected authorization format 'Bearer <token>'".to_string())
        })?;

    Ok(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // 1. 토큰 추출 + 서명/만료 검증
        let token = bearer_token(parts)?;
        let claims = state.auth_state.jwt_service.verify_access_token(token)?;

        // 2. 탈퇴했거나 없는 사용자는 거절
        let user = state
            .auth_state
            .user_repository
            .find_by_id(claims.id)
            .await
            .map_err(|e| AppError::database("Failed to fetch authenticated user", e))?
            .ok_or_else(|| AppError::Unauthorized(format!("user {} is not active", claims.id)))?;

        Ok(AuthenticatedUser {
            id: user.id,
            unique_id: claims.unique_id,
            social_type: claims.social_type,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RefreshTokenUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.auth_state.jwt_service.verify_refresh_token(token)?;

        Ok(RefreshTokenUser {
            id: claims.id,
            unique_id: claims.unique_id,
            social_type: claims.social_type,
            refresh_token: token.to_string(),
        })
    }
}
