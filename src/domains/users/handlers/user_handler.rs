use axum::{extract::State, http::StatusCode};

use crate::domains::users::models::{
    NicknameResponse, UpdateNicknameRequest, UpdatePreferredMapRequest,
};
use crate::shared::errors::AppError;
use crate::shared::extract::{ApiJson, ApiPath};
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::response::{messages, ApiResponse};
use crate::shared::services::AppState;

/// 닉네임 조회
#[utoipa::path(
    get,
    path = "/users/{id}/nickname",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Nickname (null until set)", body = NicknameResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "User not found")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Users"
)]
pub async fn get_nickname(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<NicknameResponse>, AppError> {
    let nickname = app_state
        .user_state
        .user_service
        .get_nickname(user.id, id)
        .await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::READ_NICKNAME_SUCCESS,
        nickname,
    ))
}

/// 닉네임 수정
#[utoipa::path(
    patch,
    path = "/users/{id}/nickname",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateNicknameRequest,
    responses(
        (status = 200, description = "Nickname updated", body = NicknameResponse),
        (status = 400, description = "Empty or too long nickname"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 409, description = "Nickname already taken")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Users"
)]
pub async fn update_nickname(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateNicknameRequest>,
) -> Result<ApiResponse<NicknameResponse>, AppError> {
    let nickname = app_state
        .user_state
        .user_service
        .update_nickname(user.id, id, request)
        .await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::UPDATE_NICKNAME_SUCCESS,
        nickname,
    ))
}

/// 선호 지도 수정
#[utoipa::path(
    patch,
    path = "/users/{id}/preferred-map",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdatePreferredMapRequest,
    responses(
        (status = 200, description = "Preferred map updated"),
        (status = 400, description = "Unknown map value"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Users"
)]
pub async fn update_preferred_map(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePreferredMapRequest>,
) -> Result<ApiResponse<()>, AppError> {
    app_state
        .user_state
        .user_service
        .update_preferred_map(user.id, id, request)
        .await?;

    Ok(ApiResponse::empty(
        StatusCode::OK,
        messages::UPDATE_PREFERRED_MAP_SUCCESS,
    ))
}
