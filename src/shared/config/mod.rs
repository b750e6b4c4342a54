// 환경변수 기반 설정
// Environment-driven configuration (loaded once at startup)
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;

/// JWT 설정
/// Access/refresh token secrets and lifetimes
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub access_token_expires_days: i64,
    pub refresh_token_expires_days: i64,
}

/// 카카오 OAuth 설정
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub client_id: String,
    pub redirect_url: String,
    /// 회원 탈퇴(unlink) 시 사용하는 어드민 키
    pub admin_key: String,
    pub auth_url: String,
    pub api_url: String,
}

/// 애플 로그인 설정
#[derive(Clone)]
pub struct AppleConfig {
    pub client_id: String,
    pub team_id: String,
    pub key_id: String,
    /// client secret(JWT) 서명용 ES256 private key (PKCS#8 PEM)
    /// 없으면 애플 로그인/탈퇴 호출 시 Internal 에러
    pub private_key_pem: Option<Vec<u8>>,
    pub auth_url: String,
}

// private key 가 로그에 찍히지 않도록 직접 구현
impl std::fmt::Debug for AppleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleConfig")
            .field("client_id", &self.client_id)
            .field("team_id", &self.team_id)
            .field("key_id", &self.key_id)
            .field("private_key_pem", &self.private_key_pem.as_ref().map(|_| "<redacted>"))
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub kakao: KakaoConfig,
    pub apple: AppleConfig,
    /// 도보 거리 계산용 OSRM 서버
    pub osrm_url: String,
    /// 흡연구역 이미지가 없을 때 내려줄 기본 이미지
    pub default_image: String,
    pub cors_origin: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// 환경변수에서 설정 로딩 (.env 파일이 있으면 먼저 읽음)
    /// Load configuration from the environment.
    ///
    /// JWT secret 이 없으면 서버를 띄우지 않습니다.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let jwt = JwtConfig {
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
            access_token_expires_days: parse_or("ACCESS_TOKEN_EXPIRES_DAYS", 10)?,
            refresh_token_expires_days: parse_or("REFRESH_TOKEN_EXPIRES_DAYS", 30)?,
        };

        let kakao = KakaoConfig {
            client_id: or_default("KAKAO_CLIENT_ID", ""),
            redirect_url: or_default("KAKAO_REDIRECT_URL", ""),
            admin_key: or_default("KAKAO_ADMIN_KEY", ""),
            auth_url: or_default("KAKAO_AUTH_URL", "https://kauth.kakao.com"),
            api_url: or_default("KAKAO_API_URL", "https://kapi.kakao.com"),
        };

        let apple = AppleConfig {
            client_id: or_default("APPLE_CLIENTID", ""),
            team_id: or_default("APPLE_TEAMID", ""),
            key_id: or_default("APPLE_KEYID", ""),
            private_key_pem: load_apple_private_key()?,
            auth_url: or_default("APPLE_AUTH_URL", "https://appleid.apple.com"),
        };

        Ok(Self {
            port: parse_or("PORT", 3000)?,
            database_url: required("DATABASE_URL")?,
            jwt,
            kakao,
            apple,
            osrm_url: or_default("OSRM_URL", "http://router.project-osrm.org"),
            default_image: or_default("DEFAULT_IMAGE", ""),
            cors_origin: optional("CORS_ORIGIN"),
            slack_webhook_url: optional("SLACK_WEBHOOK_URL"),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", 10)?,
        })
    }
}

/// APPLE_PRIVATE_KEY_BASE64 (컨테이너 환경) 우선, 없으면 APPLE_KEYFILE_PATH
fn load_apple_private_key() -> Result<Option<Vec<u8>>> {
    if let Some(encoded) = optional("APPLE_PRIVATE_KEY_BASE64") {
        let pem = STANDARD
            .decode(encoded.trim())
            .context("APPLE_PRIVATE_KEY_BASE64 is not valid base64")?;
        return Ok(Some(pem));
    }

    match optional("APPLE_KEYFILE_PATH") {
        Some(path) => {
            let pem = std::fs::read(&path)
                .with_context(|| format!("Failed to read apple key file: {}", path))?;
            Ok(Some(pem))
        }
        None => Ok(None),
    }
}

fn required(key: &str) -> Result<String> {
    match optional(key) {
        Some(value) => Ok(value),
        None => bail!("Missing required environment variable: {}", key),
    }
}

/// 비어있는 값은 설정되지 않은 것으로 취급
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}
