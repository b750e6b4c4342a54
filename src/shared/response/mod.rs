// 공통 성공 응답 봉투
// Standard success envelope: { success, statusCode, message, data }
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 응답 메시지 모음
/// Success messages returned in the envelope
pub mod messages {
    pub const ISSUED_TOKEN_SUCCESS: &str = "토큰 발급 성공";
    pub const SIGNIN_USER_SUCCESS: &str = "로그인/회원가입 성공";
    pub const REISSUED_TOKEN_SUCCESS: &str = "토큰 재발급 성공";
    pub const DELETE_USER_SUCCESS: &str = "회원 탈퇴 성공";
    pub const READ_NICKNAME_SUCCESS: &str = "유저 닉네임 조회 성공";
    pub const UPDATE_NICKNAME_SUCCESS: &str = "유저 닉네임 수정 성공";
    pub const UPDATE_PREFERRED_MAP_SUCCESS: &str = "유저 선호지도 수정 성공";
    pub const READ_SMOKING_AREAS_SUCCESS: &str = "흡연구역 전체 조회 성공";
    pub const READ_SMOKING_AREA_SUCCESS: &str = "흡연구역 상세 조회 성공";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// data 없는 성공 응답 (`data: null`)
    pub fn empty(status: StatusCode, message: &str) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: message.to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
