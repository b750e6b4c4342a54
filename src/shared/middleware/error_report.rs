use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::shared::services::AppState;

/// 5xx 응답을 Slack 으로 알림
/// Reports server errors to the configured webhook without delaying the response
pub async fn report_server_errors(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        if let Some(notifier) = &app_state.notifier {
            notifier.spawn_notify_error(method, path, response.status().as_u16());
        }
    }

    response
}
