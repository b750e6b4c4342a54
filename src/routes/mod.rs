// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터 + 공통 layer 조합
// Routes module: combines all domain routers and the cross-cutting layers

use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domains::auth::routes::create_auth_router;
use crate::domains::maps::routes::create_map_router;
use crate::domains::users::routes::create_user_router;
use crate::openapi::ApiDoc;
use crate::shared::errors::AppError;
use crate::shared::middleware::report_server_errors;
use crate::shared::services::AppState;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .nest("/auth", create_auth_router())
        .nest("/users", create_user_router())
        .nest("/maps", create_map_router())
}

/// 서버 전체 애플리케이션 (Swagger, fallback, layer 포함)
/// Full application router with state applied
pub fn create_app(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.config.cors_origin.as_deref());

    Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // panic 도 500 에러 봉투로 응답, 알림 middleware 가 볼 수 있도록 안쪽에 둠
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            report_server_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

// 헬스 체크
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// CORS 설정 (CORS_ORIGIN 이 없으면 모든 origin 허용)
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];

    match origin.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "invalid CORS_ORIGIN, allowing any origin");
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(methods)
                .allow_headers(headers)
        }
        None => CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(methods)
            .allow_headers(headers),
    }
}
