// Auth domain routes
// 인증 도메인 라우터
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/kakao/callback", get(auth_handler::kakao_callback))
        .route("/signin", post(auth_handler::signin))
        .route("/reissue/token", get(auth_handler::reissue_token))
        .route("/:id", delete(auth_handler::delete_user))
}
