use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::errors::AppError;
use crate::shared::utils::{is_valid_latitude, is_valid_longitude};

/// 위/경도 좌표
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// 흡연구역 (DB 레코드)
/// Smoking area record
#[derive(Debug, Clone)]
pub struct SmokingArea {
    pub id: i64,
    pub area_name: String,
    pub address: String,
    pub image: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub is_deleted: bool,
}

impl SmokingArea {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// 흡연구역 위치 (목록 조회용)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(as = SmokingAreaPoint)]
pub struct SmokingAreaPoint {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 37.5665)]
    pub latitude: f64,
    #[schema(example = 126.978)]
    pub longitude: f64,
}

// 흡연구역 전체 조회 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SmokingAreasResponse)]
pub struct SmokingAreasResponse {
    /// 반경 2km 이내 흡연구역 수
    pub total: usize,
    pub areas: Vec<SmokingAreaPoint>,
}

// 흡연구역 상세 조회 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SmokingAreaResponse)]
pub struct SmokingAreaResponse {
    #[schema(example = "시청역 흡연구역")]
    pub name: String,
    #[schema(example = "서울 중구 세종대로 110")]
    pub address: String,
    pub image: String,
    /// 현재 위치에서 도보 거리 (예: "312.4m", 경로가 없으면 "-m")
    #[schema(example = "312.4m")]
    pub distance: String,
}

// 위/경도 query
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MapQuery {
    /// 중심 latitude
    pub lat: f64,
    /// 중심 longitude
    pub long: f64,
}

impl MapQuery {
    pub fn validate(&self) -> Result<Coordinate, AppError> {
        if !is_valid_latitude(self.lat) {
            return Err(AppError::BadRequest(format!("invalid latitude: {}", self.lat)));
        }
        if !is_valid_longitude(self.long) {
            return Err(AppError::BadRequest(format!("invalid longitude: {}", self.long)));
        }

        Ok(Coordinate {
            latitude: self.lat,
            longitude: self.long,
        })
    }
}
