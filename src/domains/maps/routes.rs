// Maps domain routes
// 흡연구역 도메인 라우터
use axum::{routing::get, Router};

use crate::domains::maps::handlers::map_handler;
use crate::shared::services::AppState;

/// 흡연구역 라우터 생성
pub fn create_map_router() -> Router<AppState> {
    Router::new()
        .route("/", get(map_handler::get_smoking_areas))
        .route("/:id", get(map_handler::get_smoking_area))
}
