// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 메모리 저장소 + fake provider 로 전체 Router 구성
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = TestApp::new();
//     let (status, body) = app.send(get("/", None)).await;
//     // 테스트 코드...
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use smoking_area_api::domains::maps::models::{Coordinate, SmokingArea};
use smoking_area_api::shared::clients::{
    AppleApi, AppleIdentity, KakaoApi, KakaoProfile, RoutingApi,
};
use smoking_area_api::shared::config::{AppConfig, AppleConfig, JwtConfig, KakaoConfig};
use smoking_area_api::shared::database::{MemoryMapRepository, MemoryUserRepository};
use smoking_area_api::shared::errors::AppError;
use smoking_area_api::shared::services::{AppState, Collaborators};
use smoking_area_api::create_app;

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";
pub const DEFAULT_IMAGE: &str = "https://cdn.example.com/default.png";

/// 테스트용 설정 (외부 URL 은 사용되지 않음)
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        database_url: "postgres://unused".to_string(),
        jwt: JwtConfig {
            access_token_secret: ACCESS_SECRET.to_string(),
            refresh_token_secret: REFRESH_SECRET.to_string(),
            access_token_expires_days: 10,
            refresh_token_expires_days: 30,
        },
        kakao: KakaoConfig {
            client_id: "kakao-client".to_string(),
            redirect_url: "http://localhost/auth/kakao/callback".to_string(),
            admin_key: "kakao-admin".to_string(),
            auth_url: "http://127.0.0.1:9".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        },
        apple: AppleConfig {
            client_id: "com.example.app".to_string(),
            team_id: "TEAM123456".to_string(),
            key_id: "KEY1234567".to_string(),
            private_key_pem: None,
            auth_url: "http://127.0.0.1:9".to_string(),
        },
        osrm_url: "http://127.0.0.1:9".to_string(),
        default_image: DEFAULT_IMAGE.to_string(),
        cors_origin: None,
        slack_webhook_url: None,
        http_timeout_secs: 1,
    }
}

// =====================================================
// Fake providers
// =====================================================

/// 카카오 fake: access token -> 프로필
#[derive(Default)]
pub struct FakeKakao {
    profiles: Mutex<HashMap<String, KakaoProfile>>,
    pub profile_calls: AtomicUsize,
    pub fail_unlink: AtomicBool,
    pub unlinked: Mutex<Vec<i64>>,
}

impl FakeKakao {
    pub fn add_profile(&self, access_token: &str, profile: KakaoProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(access_token.to_string(), profile);
    }

    pub fn calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KakaoApi for FakeKakao {
    async fn exchange_code_for_token(&self, code: &str) -> Result<String, AppError> {
        if code == "bad-code" {
            return Err(AppError::Internal("kakao token exchange failed".to_string()));
        }
        Ok(format!("kakao-access-for-{}", code))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("unknown kakao token".to_string()))
    }

    async fn unlink(&self, kakao_id: i64) -> Result<(), AppError> {
        if self.fail_unlink.load(Ordering::SeqCst) {
            return Err(AppError::Internal("kakao unlink failed".to_string()));
        }
        self.unlinked.lock().unwrap().push(kakao_id);
        Ok(())
    }
}

/// 애플 fake: identity token -> 사용자
#[derive(Default)]
pub struct FakeApple {
    identities: Mutex<HashMap<String, AppleIdentity>>,
    pub verify_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub revoked: Mutex<Vec<String>>,
}

impl FakeApple {
    pub fn add_identity(&self, id_token: &str, subject: &str, email: Option<&str>) {
        self.identities.lock().unwrap().insert(
            id_token.to_string(),
            AppleIdentity {
                subject: subject.to_string(),
                email: email.map(str::to_string),
            },
        );
    }

    pub fn calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst) + self.exchange_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppleApi for FakeApple {
    async fn verify_identity_token(&self, id_token: &str) -> Result<AppleIdentity, AppError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.identities
            .lock()
            .unwrap()
            .get(id_token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("invalid identity token".to_string()))
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<String, AppError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("apple-refresh-for-{}", code))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        self.revoked.lock().unwrap().push(refresh_token.to_string());
        Ok(())
    }
}

/// OSRM fake: 고정 거리 응답
pub struct FakeRouting {
    pub distance: Mutex<Option<f64>>,
    pub fail: AtomicBool,
    pub requests: Mutex<Vec<(Coordinate, Coordinate)>>,
}

impl Default for FakeRouting {
    fn default() -> Self {
        Self {
            distance: Mutex::new(Some(312.4)),
            fail: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RoutingApi for FakeRouting {
    async fn walking_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<f64>, AppError> {
        self.requests.lock().unwrap().push((from, to));
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("osrm unavailable".to_string()));
        }
        Ok(*self.distance.lock().unwrap())
    }
}

// =====================================================
// Test application
// =====================================================

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserRepository>,
    pub maps: Arc<MemoryMapRepository>,
    pub kakao: Arc<FakeKakao>,
    pub apple: Arc<FakeApple>,
    pub routing: Arc<FakeRouting>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        let maps = Arc::new(MemoryMapRepository::new());
        let kakao = Arc::new(FakeKakao::default());
        let apple = Arc::new(FakeApple::default());
        let routing = Arc::new(FakeRouting::default());

        let state = AppState::with_collaborators(
            test_config(),
            Collaborators {
                user_repository: users.clone(),
                map_repository: maps.clone(),
                kakao: kakao.clone(),
                apple: apple.clone(),
                routing: routing.clone(),
                notifier: None,
            },
        );

        Self {
            router: create_app(state),
            users,
            maps,
            kakao,
            apple,
            routing,
        }
    }

    /// 요청 전송 후 (상태 코드, JSON body) 반환
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    /// 카카오 프로필 등록 후 로그인, (id, access token, refresh token) 반환
    pub async fn signin_kakao(&self, kakao_id: i64) -> (i64, String, String) {
        let token = format!("kakao-token-{}", kakao_id);
        self.kakao.add_profile(&token, kakao_profile(kakao_id));

        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/auth/signin",
                None,
                serde_json::json!({ "socialType": "kakao", "kakaoAccessToken": token }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "signin failed: {}", body);

        let data = &body["data"];
        (
            data["id"].as_i64().expect("id"),
            data["accessToken"].as_str().expect("accessToken").to_string(),
            data["refreshToken"].as_str().expect("refreshToken").to_string(),
        )
    }

    pub async fn add_area(&self, id: i64, latitude: f64, longitude: f64, image: Option<&str>) {
        self.maps
            .insert(SmokingArea {
                id,
                area_name: format!("흡연구역 {}", id),
                address: format!("서울 중구 {}", id),
                image: image.map(str::to_string),
                latitude,
                longitude,
                is_deleted: false,
            })
            .await;
    }
}

pub fn kakao_profile(kakao_id: i64) -> KakaoProfile {
    KakaoProfile {
        external_id: kakao_id,
        nickname: Some("카카오유저".to_string()),
        email: Some(format!("user{}@kakao.com", kakao_id)),
        age_range: Some("20~29".to_string()),
        gender: Some("female".to_string()),
    }
}

// =====================================================
// Request builders
// =====================================================

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, Body::empty())
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, token, Body::empty())
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut req = request(method, uri, token, Body::from(body.to_string()));
    req.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    req
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(body).expect("Failed to build request")
}
