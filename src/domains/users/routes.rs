// Users domain routes
// 사용자 도메인 라우터
use axum::{
    routing::{get, patch},
    Router,
};

use crate::domains::users::handlers::user_handler;
use crate::shared::services::AppState;

/// 사용자 라우터 생성
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/nickname",
            get(user_handler::get_nickname).patch(user_handler::update_nickname),
        )
        .route("/:id/preferred-map", patch(user_handler::update_preferred_map))
}
