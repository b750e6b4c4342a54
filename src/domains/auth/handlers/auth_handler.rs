use axum::{extract::State, http::StatusCode};

use crate::domains::auth::models::{
    KakaoCallbackQuery, KakaoCallbackResponse, SigninRequest, SigninResponse, TokenResponse,
};
use crate::shared::errors::AppError;
use crate::shared::extract::{ApiJson, ApiPath, ApiQuery};
use crate::shared::middleware::auth::{AuthenticatedUser, RefreshTokenUser};
use crate::shared::response::{messages, ApiResponse};
use crate::shared::services::AppState;

/// 카카오 로그인 콜백 (인가 코드 -> 카카오 access token)
#[utoipa::path(
    get,
    path = "/auth/kakao/callback",
    params(KakaoCallbackQuery),
    responses(
        (status = 200, description = "Kakao access token issued", body = KakaoCallbackResponse),
        (status = 400, description = "Missing code"),
        (status = 500, description = "Kakao token exchange failed")
    ),
    tag = "Auth"
)]
pub async fn kakao_callback(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<KakaoCallbackQuery>,
) -> Result<ApiResponse<KakaoCallbackResponse>, AppError> {
    let response = app_state
        .auth_state
        .auth_service
        .kakao_callback(&query.code)
        .await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::ISSUED_TOKEN_SUCCESS,
        response,
    ))
}

// 로그인/회원가입 핸들러
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 201, description = "Signed in (user created on first sign-in)", body = SigninResponse),
        (status = 400, description = "Invalid credential combination"),
        (status = 401, description = "Provider rejected the credential"),
        (status = 404, description = "Provider profile not found"),
        (status = 500, description = "Provider or database failure")
    ),
    tag = "Auth"
)]
pub async fn signin(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<SigninRequest>,
) -> Result<ApiResponse<SigninResponse>, AppError> {
    // Service 호출 (검증 -> provider 확인 -> 사용자 조회/생성 -> 토큰 발급)
    let response = app_state.auth_state.auth_service.signin(request).await?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        messages::SIGNIN_USER_SUCCESS,
        response,
    ))
}

/// 토큰 재발급 핸들러 (Authorization: Bearer <refresh token>)
#[utoipa::path(
    get,
    path = "/auth/reissue/token",
    responses(
        (status = 200, description = "Token pair rotated", body = TokenResponse),
        (status = 401, description = "Invalid or expired refresh token"),
        (status = 403, description = "Refresh token already rotated")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn reissue_token(
    State(app_state): State<AppState>,
    user: RefreshTokenUser,
) -> Result<ApiResponse<TokenResponse>, AppError> {
    let tokens = app_state
        .auth_state
        .auth_service
        .reissue_tokens(user.id, &user.refresh_token)
        .await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::REISSUED_TOKEN_SUCCESS,
        tokens.into(),
    ))
}

/// 회원 탈퇴 핸들러
#[utoipa::path(
    delete,
    path = "/auth/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted (envelope statusCode 204, data null)"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Provider unlink/revoke failed")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<(StatusCode, ApiResponse<()>), AppError> {
    app_state
        .auth_state
        .auth_service
        .delete_user(user.id, id)
        .await?;

    // envelope 의 statusCode 는 204, HTTP 상태는 body 를 내려주기 위해 200
    Ok((
        StatusCode::OK,
        ApiResponse::empty(StatusCode::NO_CONTENT, messages::DELETE_USER_SUCCESS),
    ))
}
