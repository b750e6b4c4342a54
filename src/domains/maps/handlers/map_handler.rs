use axum::{extract::State, http::StatusCode};

use crate::domains::maps::models::{MapQuery, SmokingAreaResponse, SmokingAreasResponse};
use crate::shared::errors::AppError;
use crate::shared::extract::{ApiPath, ApiQuery};
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::response::{messages, ApiResponse};
use crate::shared::services::AppState;

/// 흡연구역 전체 조회 (반경 2km)
#[utoipa::path(
    get,
    path = "/maps",
    params(MapQuery),
    responses(
        (status = 200, description = "Smoking areas within 2km", body = SmokingAreasResponse),
        (status = 400, description = "Invalid latitude/longitude"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Maps"
)]
pub async fn get_smoking_areas(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<MapQuery>,
) -> Result<ApiResponse<SmokingAreasResponse>, AppError> {
    let center = query.validate()?;

    let areas = app_state.map_state.map_service.get_nearby(center).await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::READ_SMOKING_AREAS_SUCCESS,
        areas,
    ))
}

/// 흡연구역 상세 조회
#[utoipa::path(
    get,
    path = "/maps/{id}",
    params(
        ("id" = i64, Path, description = "Smoking area ID"),
        MapQuery
    ),
    responses(
        (status = 200, description = "Smoking area detail", body = SmokingAreaResponse),
        (status = 400, description = "Invalid id or coordinates"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Smoking area not found"),
        (status = 500, description = "Routing server failure")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Maps"
)]
pub async fn get_smoking_area(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<MapQuery>,
) -> Result<ApiResponse<SmokingAreaResponse>, AppError> {
    let current = query.validate()?;

    let area = app_state
        .map_state
        .map_service
        .get_detail(id, current)
        .await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        messages::READ_SMOKING_AREA_SUCCESS,
        area,
    ))
}
