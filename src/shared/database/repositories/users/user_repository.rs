use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::users::models::{Gender, NewUser, PreferredMap, ProviderId, SocialType, User};

/// 사용자 저장소 인터페이스
/// User persistence interface
///
/// 모든 조회는 `is_deleted = FALSE` 인 사용자만 대상으로 합니다.
/// Service 는 이 trait 만 참조하므로 테스트에서는 `MemoryUserRepository` 로 교체합니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_provider_id(&self, provider_id: &ProviderId) -> Result<Option<User>>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>>;

    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// refresh token 해시 교체 (이전 값 덮어쓰기)
    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<()>;

    async fn update_nickname(&self, id: i64, nickname: &str) -> Result<User>;

    async fn update_preferred_map(&self, id: i64, preferred_map: PreferredMap) -> Result<()>;

    /// 논리 삭제: provider ID, refresh token 해시, apple refresh token 도 함께 비움
    /// Soft delete, clearing provider id and stored tokens so they cannot be reused
    async fn soft_delete(&self, id: i64) -> Result<()>;
}

const USER_COLUMNS: &str = "id, social_type, kakao_id, apple_id, nickname, name, email, \
    age_range, gender, preferred_map, refresh_token, apple_refresh_token, is_deleted, \
    created_at, updated_at";

/// PostgreSQL 사용자 저장소
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        let social_type: i16 = row.try_get("social_type")?;
        let gender: Option<i16> = row.try_get("gender")?;
        let preferred_map: i16 = row.try_get("preferred_map")?;

        Ok(User {
            id: row.try_get("id")?,
            social_type: SocialType::from_i16(social_type)
                .ok_or_else(|| anyhow!("Unknown social_type in users table: {}", social_type))?,
            kakao_id: row.try_get("kakao_id")?,
            apple_id: row.try_get("apple_id")?,
            nickname: row.try_get("nickname")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            age_range: row.try_get("age_range")?,
            gender: gender.and_then(Gender::from_i16),
            preferred_map: PreferredMap::from_i16(preferred_map).unwrap_or_default(),
            refresh_token: row.try_get("refresh_token")?,
            apple_refresh_token: row.try_get("apple_refresh_token")?,
            is_deleted: row.try_get("is_deleted")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    // ID로 사용자 조회
    // Get user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1 AND is_deleted = FALSE",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    // provider ID 로 사용자 조회 (로그인용)
    // Get user by provider id (for sign-in)
    async fn find_by_provider_id(&self, provider_id: &ProviderId) -> Result<Option<User>> {
        let column = match provider_id {
            ProviderId::Kakao(_) => "kakao_id",
            ProviderId::Apple(_) => "apple_id",
        };
        let sql = format!(
            "SELECT {} FROM users WHERE {} = $1 AND social_type = $2 AND is_deleted = FALSE",
            USER_COLUMNS, column
        );

        let query = sqlx::query(&sql);
        let query = match provider_id {
            ProviderId::Kakao(kakao_id) => query.bind(*kakao_id),
            ProviderId::Apple(apple_id) => query.bind(apple_id.as_str()),
        };

        let row = query
            .bind(provider_id.social_type().as_i16())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by provider id")?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE nickname = $1 AND is_deleted = FALSE",
            USER_COLUMNS
        ))
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by nickname")?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (social_type, kakao_id, apple_id, name, email, age_range, gender,
                               apple_refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(new_user.social_type().as_i16())
        .bind(new_user.kakao_id())
        .bind(new_user.apple_id())
        .bind(new_user.name.as_deref())
        .bind(new_user.email.as_deref())
        .bind(new_user.age_range.as_deref())
        .bind(new_user.gender.map(Gender::as_i16))
        .bind(new_user.apple_refresh_token.as_deref())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create user")?;

        Self::row_to_user(&row)
    }

    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(hash)
        .execute(&self.pool)
        .await
        .context("Failed to update refresh token")?;

        Ok(())
    }

    async fn update_nickname(&self, id: i64, nickname: &str) -> Result<User> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET nickname = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(nickname)
        .fetch_one(&self.pool)
        .await
        .context("Failed to update nickname")?;

        Self::row_to_user(&row)
    }

    async fn update_preferred_map(&self, id: i64, preferred_map: PreferredMap) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET preferred_map = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(preferred_map.as_i16())
        .execute(&self.pool)
        .await
        .context("Failed to update preferred map")?;

        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_deleted = TRUE,
                kakao_id = NULL,
                apple_id = NULL,
                refresh_token = NULL,
                apple_refresh_token = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to soft delete user")?;

        Ok(())
    }
}
