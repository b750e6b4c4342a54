use std::sync::Arc;

use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::maps::services::MapState;
use crate::domains::users::services::UserState;
use crate::shared::clients::{
    AppleApi, AppleClient, KakaoApi, KakaoClient, OsrmClient, RoutingApi, SlackNotifier,
};
use crate::shared::config::AppConfig;
use crate::shared::database::{Database, MapRepository, PgMapRepository, PgUserRepository, UserRepository};

/// 서비스들이 의존하는 외부 구성 요소 묶음
/// Repositories and provider clients injected into the domain states
pub struct Collaborators {
    pub user_repository: Arc<dyn UserRepository>,
    pub map_repository: Arc<dyn MapRepository>,
    pub kakao: Arc<dyn KakaoApi>,
    pub apple: Arc<dyn AppleApi>,
    pub routing: Arc<dyn RoutingApi>,
    pub notifier: Option<SlackNotifier>,
}

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_state: AuthState,
    pub user_state: UserState,
    pub map_state: MapState,
    /// 5xx 알림 (SLACK_WEBHOOK_URL 이 있을 때만)
    pub notifier: Option<SlackNotifier>,
}

impl AppState {
    /// Create AppState with database and shared HTTP client
    /// PostgreSQL 저장소 + 실제 provider 클라이언트로 초기화
    pub fn new(config: AppConfig, db: &Database, http_client: reqwest::Client) -> Self {
        let collaborators = Collaborators {
            user_repository: Arc::new(PgUserRepository::new(db.pool().clone())),
            map_repository: Arc::new(PgMapRepository::new(db.pool().clone())),
            kakao: Arc::new(KakaoClient::new(http_client.clone(), config.kakao.clone())),
            apple: Arc::new(AppleClient::new(http_client.clone(), config.apple.clone())),
            routing: Arc::new(OsrmClient::new(http_client.clone(), config.osrm_url.clone())),
            notifier: config
                .slack_webhook_url
                .clone()
                .map(|url| SlackNotifier::new(http_client.clone(), url)),
        };

        Self::with_collaborators(config, collaborators)
    }

    /// 구성 요소를 직접 주입 (테스트에서 fake 사용)
    pub fn with_collaborators(config: AppConfig, collaborators: Collaborators) -> Self {
        let jwt_service = JwtService::new(&config.jwt);

        let auth_state = AuthState::new(
            collaborators.user_repository.clone(),
            collaborators.kakao,
            collaborators.apple,
            jwt_service,
        );
        let user_state = UserState::new(collaborators.user_repository);
        let map_state = MapState::new(
            collaborators.map_repository,
            collaborators.routing,
            config.default_image.clone(),
        );

        Self {
            config: Arc::new(config),
            auth_state,
            user_state,
            map_state,
            notifier: collaborators.notifier,
        }
    }
}
