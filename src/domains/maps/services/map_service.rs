use std::sync::Arc;

use crate::domains::maps::models::{Coordinate, SmokingAreaResponse, SmokingAreasResponse};
use crate::shared::clients::RoutingApi;
use crate::shared::database::MapRepository;
use crate::shared::errors::AppError;
use crate::shared::utils::NEARBY_RADIUS_KM;

/// 경로가 없을 때 내려주는 거리
pub const UNKNOWN_DISTANCE: &str = "-m";

// 흡연구역 서비스
// MapService: nearby lookup and detail with walking distance
#[derive(Clone)]
pub struct MapService {
    map_repository: Arc<dyn MapRepository>,
    routing: Arc<dyn RoutingApi>,
    default_image: String,
}

impl MapService {
    pub fn new(
        map_repository: Arc<dyn MapRepository>,
        routing: Arc<dyn RoutingApi>,
        default_image: String,
    ) -> Self {
        Self {
            map_repository,
            routing,
            default_image,
        }
    }

    /// 현재 위치 반경 2km 이내 흡연구역
    pub async fn get_nearby(&self, center: Coordinate) -> Result<SmokingAreasResponse, AppError> {
        let areas = self
            .map_repository
            .find_within_radius(center.latitude, center.longitude, NEARBY_RADIUS_KM)
            .await
            .map_err(|e| AppError::database("Failed to fetch nearby smoking areas", e))?;

        Ok(SmokingAreasResponse {
            total: areas.len(),
            areas,
        })
    }

    /// 흡연구역 상세 + 현재 위치에서 도보 거리
    pub async fn get_detail(
        &self,
        id: i64,
        current: Coordinate,
    ) -> Result<SmokingAreaResponse, AppError> {
        let area = self
            .map_repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database("Failed to fetch smoking area", e))?
            .ok_or_else(|| AppError::NotFound(format!("smoking area {} not found", id)))?;

        let distance = self
            .routing
            .walking_distance(current, area.coordinate())
            .await?;

        Ok(SmokingAreaResponse {
            name: area.area_name,
            address: area.address,
            image: area
                .image
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| self.default_image.clone()),
            distance: format_distance(distance),
        })
    }
}

/// 미터 단위 거리 문자열 ("312.4m", 경로 없으면 "-m")
pub fn format_distance(meters: Option<f64>) -> String {
    match meters {
        Some(meters) => format!("{}m", meters),
        None => UNKNOWN_DISTANCE.to_string(),
    }
}
