use std::sync::Arc;

use crate::domains::users::models::{
    NicknameResponse, UpdateNicknameRequest, UpdatePreferredMapRequest, User,
};
use crate::shared::database::{is_unique_violation, UserRepository};
use crate::shared::errors::AppError;

// 사용자 서비스
// UserService: nickname and preferred map management
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// 닉네임 조회
    pub async fn get_nickname(&self, caller_id: i64, id: i64) -> Result<NicknameResponse, AppError> {
        ensure_owner(caller_id, id)?;

        let user = self.find_user(id).await?;
        Ok(NicknameResponse {
            nickname: user.nickname,
        })
    }

    /// 닉네임 수정
    /// 다른 사용자가 쓰는 닉네임이면 Conflict, 자기 닉네임 그대로면 성공
    pub async fn update_nickname(
        &self,
        caller_id: i64,
        id: i64,
        request: UpdateNicknameRequest,
    ) -> Result<NicknameResponse, AppError> {
        ensure_owner(caller_id, id)?;
        let nickname = request.validate()?;

        let user = self.find_user(id).await?;
        if user.nickname.as_deref() == Some(nickname.as_str()) {
            return Ok(NicknameResponse {
                nickname: Some(nickname),
            });
        }

        let holder = self
            .user_repository
            .find_by_nickname(&nickname)
            .await
            .map_err(|e| AppError::database("Failed to fetch user by nickname", e))?;
        if let Some(holder) = holder {
            if holder.id != id {
                return Err(AppError::Conflict(format!("nickname {} is taken", nickname)));
            }
        }

        // 조회와 수정 사이에 선점된 경우도 unique index 로 Conflict
        let updated = self
            .user_repository
            .update_nickname(id, &nickname)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("nickname {} is taken", nickname))
                } else {
                    AppError::database("Failed to update nickname", e)
                }
            })?;

        tracing::debug!(user_id = id, "nickname updated");
        Ok(NicknameResponse {
            nickname: updated.nickname,
        })
    }

    /// 선호 지도 수정
    pub async fn update_preferred_map(
        &self,
        caller_id: i64,
        id: i64,
        request: UpdatePreferredMapRequest,
    ) -> Result<(), AppError> {
        ensure_owner(caller_id, id)?;
        let preferred_map = request.validate()?;

        let user = self.find_user(id).await?;
        self.user_repository
            .update_preferred_map(user.id, preferred_map)
            .await
            .map_err(|e| AppError::database("Failed to update preferred map", e))?;

        tracing::debug!(user_id = id, ?preferred_map, "preferred map updated");
        Ok(())
    }

    async fn find_user(&self, id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database("Failed to fetch user", e))?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }
}

// path 의 id 와 토큰의 id 가 같아야 함
fn ensure_owner(caller_id: i64, id: i64) -> Result<(), AppError> {
    if caller_id != id {
        return Err(AppError::Forbidden(format!(
            "user {} cannot access user {}",
            caller_id, id
        )));
    }
    Ok(())
}
