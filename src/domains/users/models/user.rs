use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 소셜 로그인 종류
/// Social provider discriminator (stored as SMALLINT: kakao = 1, apple = 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SocialType {
    Kakao,
    Apple,
}

impl SocialType {
    pub fn as_i16(self) -> i16 {
        match self {
            SocialType::Kakao => 1,
            SocialType::Apple => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(SocialType::Kakao),
            2 => Some(SocialType::Apple),
            _ => None,
        }
    }

    /// 요청 문자열 -> enum ("kakao" / "apple")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kakao" => Some(SocialType::Kakao),
            "apple" => Some(SocialType::Apple),
            _ => None,
        }
    }
}

/// 성별 (카카오 프로필)
/// Gender (stored as SMALLINT: male = 1, female = 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_i16(self) -> i16 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }

    /// provider 문자열 -> enum, 모르는 값은 None
    pub fn from_provider(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// 선호 지도
/// Preferred map provider (0 = kakao, 1 = google, 2 = naver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PreferredMap {
    #[default]
    Kakao,
    Google,
    Naver,
}

impl PreferredMap {
    pub fn as_i16(self) -> i16 {
        match self {
            PreferredMap::Kakao => 0,
            PreferredMap::Google => 1,
            PreferredMap::Naver => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(PreferredMap::Kakao),
            1 => Some(PreferredMap::Google),
            2 => Some(PreferredMap::Naver),
            _ => None,
        }
    }
}

/// provider 쪽 외부 ID
/// Provider-specific external id (also selects the social type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderId {
    Kakao(i64),
    Apple(String),
}

impl ProviderId {
    pub fn social_type(&self) -> SocialType {
        match self {
            ProviderId::Kakao(_) => SocialType::Kakao,
            ProviderId::Apple(_) => SocialType::Apple,
        }
    }

    /// JWT payload 의 uniqueId
    pub fn unique_id(&self) -> String {
        match self {
            ProviderId::Kakao(id) => id.to_string(),
            ProviderId::Apple(sub) => sub.clone(),
        }
    }
}

/// 사용자 (DB 레코드)
/// Persisted user record
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub social_type: SocialType,
    pub kakao_id: Option<i64>,
    pub apple_id: Option<String>,
    /// 앱 내 닉네임 (사용자가 직접 설정, 중복 불가)
    pub nickname: Option<String>,
    /// provider 프로필 이름
    pub name: Option<String>,
    pub email: Option<String>,
    pub age_range: Option<String>,
    pub gender: Option<Gender>,
    pub preferred_map: PreferredMap,
    /// 가장 최근 발급한 refresh token 의 해시
    pub refresh_token: Option<String>,
    /// 애플 탈퇴(revoke) 시 필요한 provider refresh token
    pub apple_refresh_token: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 현재 연결된 provider ID (soft delete 후에는 None)
    pub fn provider_id(&self) -> Option<ProviderId> {
        match self.social_type {
            SocialType::Kakao => self.kakao_id.map(ProviderId::Kakao),
            SocialType::Apple => self.apple_id.clone().map(ProviderId::Apple),
        }
    }
}

/// 사용자 생성 데이터
/// Attributes for a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub provider_id: ProviderId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age_range: Option<String>,
    pub gender: Option<Gender>,
    pub apple_refresh_token: Option<String>,
}

impl NewUser {
    pub fn social_type(&self) -> SocialType {
        self.provider_id.social_type()
    }

    pub fn kakao_id(&self) -> Option<i64> {
        match &self.provider_id {
            ProviderId::Kakao(id) => Some(*id),
            ProviderId::Apple(_) => None,
        }
    }

    pub fn apple_id(&self) -> Option<&str> {
        match &self.provider_id {
            ProviderId::Apple(sub) => Some(sub.as_str()),
            ProviderId::Kakao(_) => None,
        }
    }
}

/// 빈 문자열은 NULL 로 저장
/// Provider fields that arrive as "" are stored as NULL
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_type_table() {
        assert_eq!(SocialType::from_name("kakao"), Some(SocialType::Kakao));
        assert_eq!(SocialType::from_name("apple"), Some(SocialType::Apple));
        assert_eq!(SocialType::from_name("google"), None);
        assert_eq!(SocialType::from_i16(SocialType::Apple.as_i16()), Some(SocialType::Apple));
    }

    #[test]
    fn test_gender_table() {
        assert_eq!(Gender::from_provider("male").map(Gender::as_i16), Some(1));
        assert_eq!(Gender::from_provider("female").map(Gender::as_i16), Some(2));
        assert_eq!(Gender::from_provider(""), None);
    }

    #[test]
    fn test_preferred_map_rejects_unknown_value() {
        assert_eq!(PreferredMap::from_i16(2), Some(PreferredMap::Naver));
        assert_eq!(PreferredMap::from_i16(3), None);
        assert_eq!(PreferredMap::default(), PreferredMap::Kakao);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("a".to_string())), Some("a".to_string()));
    }
}
