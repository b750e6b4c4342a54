use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::users::models::user::PreferredMap;
use crate::shared::errors::AppError;

/// 닉네임 최대 길이 (문자 수)
pub const NICKNAME_MAX_LEN: usize = 8;

// 닉네임 조회/수정 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = NicknameResponse)]
pub struct NicknameResponse {
    /// 닉네임 (아직 설정하지 않았다면 null)
    /// Nickname (null until the user sets one)
    #[schema(example = "흡연자")]
    pub nickname: Option<String>,
}

// 닉네임 수정 요청 모델
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = UpdateNicknameRequest)]
pub struct UpdateNicknameRequest {
    /// 수정할 닉네임 (1~8자)
    /// New nickname (1 to 8 characters)
    #[schema(example = "흡연자")]
    pub nickname: String,
}

impl UpdateNicknameRequest {
    /// 앞뒤 공백 제거 후 검증된 닉네임 반환
    pub fn validate(&self) -> Result<String, AppError> {
        let nickname = self.nickname.trim();

        if nickname.is_empty() {
            return Err(AppError::BadRequest("nickname must not be empty".to_string()));
        }
        if nickname.chars().count() > NICKNAME_MAX_LEN {
            return Err(AppError::BadRequest(format!(
                "nickname must be at most {} characters",
                NICKNAME_MAX_LEN
            )));
        }

        Ok(nickname.to_string())
    }
}

// 선호 지도 수정 요청 모델
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = UpdatePreferredMapRequest)]
pub struct UpdatePreferredMapRequest {
    /// 0 - 카카오 / 1 - 구글 / 2 - 네이버
    #[schema(example = 1)]
    pub preferred_map: i16,
}

impl UpdatePreferredMapRequest {
    pub fn validate(&self) -> Result<PreferredMap, AppError> {
        PreferredMap::from_i16(self.preferred_map).ok_or_else(|| {
            AppError::BadRequest(format!("unknown preferredMap: {}", self.preferred_map))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_validation() {
        let ok = UpdateNicknameRequest { nickname: " 흡연자 ".to_string() };
        assert_eq!(ok.validate().unwrap(), "흡연자");

        let empty = UpdateNicknameRequest { nickname: "   ".to_string() };
        assert!(matches!(empty.validate(), Err(AppError::BadRequest(_))));

        // 한글 8자는 허용, 9자는 거절
        let eight = UpdateNicknameRequest { nickname: "가나다라마바사아".to_string() };
        assert!(eight.validate().is_ok());
        let nine = UpdateNicknameRequest { nickname: "가나다라마바사아자".to_string() };
        assert!(matches!(nine.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_preferred_map_validation() {
        let naver = UpdatePreferredMapRequest { preferred_map: 2 };
        assert_eq!(naver.validate().unwrap(), PreferredMap::Naver);

        let unknown = UpdatePreferredMapRequest { preferred_map: 7 };
        assert!(matches!(unknown.validate(), Err(AppError::BadRequest(_))));
    }
}
