use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::maps::models::{SmokingArea, SmokingAreaPoint};
use crate::shared::utils::EARTH_RADIUS_KM;

/// 흡연구역 저장소 인터페이스
/// Smoking area persistence interface (soft-deleted areas are never returned)
#[async_trait]
pub trait MapRepository: Send + Sync {
    /// 중심 좌표에서 `radius_km` 이내 흡연구역
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<SmokingAreaPoint>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SmokingArea>>;
}

/// PostgreSQL 흡연구역 저장소
pub struct PgMapRepository {
    pool: PgPool,
}

impl PgMapRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_area(row: &PgRow) -> Result<SmokingArea> {
        Ok(SmokingArea {
            id: row.try_get("id")?,
            area_name: row.try_get("area_name")?,
            address: row.try_get("address")?,
            image: row.try_get("image")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

#[async_trait]
impl MapRepository for PgMapRepository {
    // 구면 코사인 법칙으로 거리 계산 후 반경 필터
    // acos 인자는 부동소수 오차 때문에 [-1, 1] 로 clamp (Postgres 는 범위 밖이면 에러)
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<SmokingAreaPoint>> {
        let rows = sqlx::query(
            r#"
            SELECT id, latitude, longitude
            FROM (
                SELECT id, latitude, longitude,
                       $3 * acos(LEAST(1.0, GREATEST(-1.0,
                           cos(radians($1)) * cos(radians(latitude))
                           * cos(radians(longitude) - radians($2))
                           + sin(radians($1)) * sin(radians(latitude))
                       ))) AS distance
                FROM maps
                WHERE is_deleted = FALSE
            ) data
            WHERE data.distance < $4
            ORDER BY data.distance
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .bind(EARTH_RADIUS_KM)
        .bind(radius_km)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch nearby smoking areas")?;

        rows.iter()
            .map(|row| -> Result<SmokingAreaPoint> {
                Ok(SmokingAreaPoint {
                    id: row.try_get("id")?,
                    latitude: row.try_get("latitude")?,
                    longitude: row.try_get("longitude")?,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SmokingArea>> {
        let row = sqlx::query(
            r#"
            SELECT id, area_name, address, image, latitude, longitude, is_deleted
            FROM maps
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch smoking area by id")?;

        row.as_ref().map(Self::row_to_area).transpose()
    }
}
