use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 애플리케이션 공통 에러
/// Application-wide error (one type, one HTTP status per kind)
///
/// 내부 메시지(`String`)는 로그에만 남기고,
/// 클라이언트에는 고정된 메시지(`public_message`)만 내려갑니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못된 요청 (형식 오류, 모순된 입력)
    /// Malformed or contradictory input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 인증 실패 (토큰 없음, 서명 오류, 만료)
    /// Missing or invalid credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음 (요청 id 불일치, refresh token 불일치)
    /// Identity mismatch or refresh token rotation mismatch
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 없음
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 (닉네임 등)
    /// Uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 내부 서버 에러 (DB, 외부 provider 실패 포함)
    /// Downstream, provider or database failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 에러 종류별 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에 노출되는 메시지
    /// Message returned to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "Bad Request",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Access Denied",
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Duplicated",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// Repository 에러(anyhow)를 Internal 로 변환하고 로그 남김
    /// Convert a repository error into `Internal`, logging the full chain
    pub fn database(context: &str, err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "{}", context);
        AppError::Internal(format!("{}: {}", context, err))
    }
}

/// 에러 응답 봉투
/// Standard error envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// AppError를 HTTP 응답으로 변환
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal(detail) => tracing::error!(%detail, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        (status, Json(ErrorEnvelope::new(status, self.public_message()))).into_response()
    }
}

// 요청 파싱 실패는 모두 400 으로 통일
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
