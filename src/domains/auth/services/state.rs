// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;

use crate::domains::auth::services::{AuthService, HashService, JwtService};
use crate::shared::clients::{AppleApi, KakaoApi};
use crate::shared::database::UserRepository;

/// Auth domain state
/// 인증 서비스 + guard 에서 쓰는 JWT 서비스/사용자 저장소
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
    pub user_repository: Arc<dyn UserRepository>,
}

impl AuthState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        kakao: Arc<dyn KakaoApi>,
        apple: Arc<dyn AppleApi>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            auth_service: AuthService::new(
                user_repository.clone(),
                kakao,
                apple,
                jwt_service.clone(),
                HashService::new(),
            ),
            jwt_service,
            user_repository,
        }
    }
}
