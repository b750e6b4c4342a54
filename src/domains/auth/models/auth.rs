use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domains::auth::models::jwt::TokenPair;
use crate::domains::users::models::SocialType;
use crate::shared::errors::AppError;

// 카카오 콜백 query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KakaoCallbackQuery {
    /// 카카오 인가 코드
    pub code: String,
}

// 카카오 콜백 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = KakaoCallbackResponse)]
pub struct KakaoCallbackResponse {
    /// 카카오 access token
    /// Kakao provider access token
    pub access_token: String,
}

// 로그인 요청 모델
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = SigninRequest)]
pub struct SigninRequest {
    /// "kakao" 또는 "apple"
    #[schema(example = "kakao")]
    pub social_type: String,

    /// 카카오 로그인 시 카카오 access token
    pub kakao_access_token: Option<String>,

    /// 애플 로그인 시 identity token
    pub id_token: Option<String>,

    /// 애플 로그인 시 authorization code
    pub code: Option<String>,
}

/// 검증된 로그인 자격 증명
/// Sign-in credential after the combination check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninCredential {
    Kakao { access_token: String },
    Apple { id_token: String, code: String },
}

impl SigninRequest {
    /// 조합 검증 (외부 호출 전에 실행)
    /// kakao -> kakaoAccessToken 만 / apple -> idToken + code 만
    pub fn validate(&self) -> Result<SigninCredential, AppError> {
        let kakao_access_token = present(&self.kakao_access_token);
        let id_token = present(&self.id_token);
        let code = present(&self.code);

        let social_type = SocialType::from_name(&self.social_type).ok_or_else(|| {
            AppError::BadRequest(format!("unknown socialType: {}", self.social_type))
        })?;

        match (social_type, kakao_access_token, id_token, code) {
            (SocialType::Kakao, Some(access_token), None, None) => Ok(SigninCredential::Kakao {
                access_token: access_token.to_string(),
            }),
            (SocialType::Apple, None, Some(id_token), Some(code)) => Ok(SigninCredential::Apple {
                id_token: id_token.to_string(),
                code: code.to_string(),
            }),
            _ => Err(AppError::BadRequest(format!(
                "invalid credential combination for socialType {}",
                self.social_type
            ))),
        }
    }
}

// 빈 문자열은 없는 것으로 취급
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// 로그인 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = SigninResponse)]
pub struct SigninResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
    /// 사용자 ID
    #[schema(example = 1)]
    pub id: i64,
}

impl SigninResponse {
    pub fn new(tokens: TokenPair, id: i64) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            id,
        }
    }
}

// 토큰 재발급 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = TokenResponse)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
