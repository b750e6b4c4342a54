use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::shared::database::DuplicateKey;
use crate::domains::users::models::{NewUser, PreferredMap, ProviderId, User};

/// 메모리 사용자 저장소 (테스트/로컬 실행용)
/// In-process user store with the same soft-delete semantics as `PgUserRepository`
///
/// DB 의 partial unique index 와 같게, 삭제되지 않은 사용자 사이에서
/// provider ID 와 닉네임 중복을 `DuplicateKey` 로 거절합니다 (`is_unique_violation` 이 인식).
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 삭제 여부와 상관없이 행 조회 (테스트 검증용)
    /// Raw row lookup including soft-deleted users
    pub async fn raw(&self, id: i64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn matches_provider(user: &User, provider_id: &ProviderId) -> bool {
    user.social_type == provider_id.social_type()
        && match provider_id {
            ProviderId::Kakao(id) => user.kakao_id == Some(*id),
            ProviderId::Apple(sub) => user.apple_id.as_deref() == Some(sub.as_str()),
        }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id && !u.is_deleted).cloned())
    }

    async fn find_by_provider_id(&self, provider_id: &ProviderId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| !u.is_deleted && matches_provider(u, provider_id))
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| !u.is_deleted && u.nickname.as_deref() == Some(nickname))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|u| !u.is_deleted && matches_provider(u, &new_user.provider_id))
        {
            return Err(DuplicateKey(format!("provider id {:?}", new_user.provider_id)).into());
        }

        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            social_type: new_user.social_type(),
            kakao_id: new_user.kakao_id(),
            apple_id: new_user.apple_id().map(str::to_string),
            nickname: None,
            name: new_user.name,
            email: new_user.email,
            age_range: new_user.age_range,
            gender: new_user.gender,
            preferred_map: PreferredMap::default(),
            refresh_token: None,
            apple_refresh_token: new_user.apple_refresh_token,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id && !u.is_deleted) {
            user.refresh_token = Some(hash.to_string());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_nickname(&self, id: i64, nickname: &str) -> Result<User> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|u| u.id != id && !u.is_deleted && u.nickname.as_deref() == Some(nickname))
        {
            return Err(DuplicateKey(format!("nickname {}", nickname)).into());
        }

        match users.iter_mut().find(|u| u.id == id && !u.is_deleted) {
            Some(user) => {
                user.nickname = Some(nickname.to_string());
                user.updated_at = Utc::now();
                Ok(user.clone())
            }
            None => bail!("user not found: id={}", id),
        }
    }

    async fn update_preferred_map(&self, id: i64, preferred_map: PreferredMap) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id && !u.is_deleted) {
            user.preferred_map = preferred_map;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.is_deleted = true;
            user.kakao_id = None;
            user.apple_id = None;
            user.refresh_token = None;
            user.apple_refresh_token = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}
