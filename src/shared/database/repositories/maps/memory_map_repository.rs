use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MapRepository;
use crate::domains::maps::models::{SmokingArea, SmokingAreaPoint};
use crate::shared::utils::distance_km;

/// 메모리 흡연구역 저장소 (테스트/로컬 실행용)
/// In-process store using the same distance formula as the SQL query
#[derive(Default)]
pub struct MemoryMapRepository {
    areas: RwLock<Vec<SmokingArea>>,
}

impl MemoryMapRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, area: SmokingArea) {
        self.areas.write().await.push(area);
    }
}

#[async_trait]
impl MapRepository for MemoryMapRepository {
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<SmokingAreaPoint>> {
        let areas = self.areas.read().await;

        let mut nearby: Vec<(f64, SmokingAreaPoint)> = areas
            .iter()
            .filter(|a| !a.is_deleted)
            .map(|a| {
                let distance = distance_km(latitude, longitude, a.latitude, a.longitude);
                let point = SmokingAreaPoint {
                    id: a.id,
                    latitude: a.latitude,
                    longitude: a.longitude,
                };
                (distance, point)
            })
            .filter(|(distance, _)| *distance < radius_km)
            .collect();

        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(nearby.into_iter().map(|(_, point)| point).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SmokingArea>> {
        let areas = self.areas.read().await;
        Ok(areas.iter().find(|a| a.id == id && !a.is_deleted).cloned())
    }
}
