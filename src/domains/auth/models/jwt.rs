use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::users::models::{SocialType, User};

/// JWT 에 담기는 사용자 정보
/// Identity carried by both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtPayload {
    pub id: i64,
    pub social_type: SocialType,
    /// provider 쪽 외부 ID (카카오 회원번호 / 애플 sub)
    pub unique_id: String,
}

impl JwtPayload {
    /// 사용자 레코드에서 payload 생성 (provider ID 가 없으면 None)
    pub fn from_user(user: &User) -> Option<Self> {
        user.provider_id().map(|provider_id| Self {
            id: user.id,
            social_type: user.social_type,
            unique_id: provider_id.unique_id(),
        })
    }
}

/// JWT Claims
/// Wire format: `{ id, socialType, uniqueId, jti, iat, exp }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: i64,
    pub social_type: SocialType,
    pub unique_id: String,
    /// 토큰마다 다른 값 (같은 초에 재발급해도 토큰이 달라짐)
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// payload 로 Claims 생성 (`lifetime_days` 일 후 만료)
    pub fn new(payload: &JwtPayload, lifetime_days: i64) -> Self {
        let now = Utc::now();

        Self {
            id: payload.id,
            social_type: payload.social_type,
            unique_id: payload.unique_id.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(lifetime_days)).timestamp(),
        }
    }

    pub fn payload(&self) -> JwtPayload {
        JwtPayload {
            id: self.id,
            social_type: self.social_type,
            unique_id: self.unique_id.clone(),
        }
    }
}

/// 발급된 토큰 쌍
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
