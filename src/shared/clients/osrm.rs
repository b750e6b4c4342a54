use async_trait::async_trait;
use serde::Deserialize;

use crate::domains::maps::models::Coordinate;
use crate::shared::errors::AppError;

/// 도보 경로 API 인터페이스
#[async_trait]
pub trait RoutingApi: Send + Sync {
    /// 도보 거리 (미터). 경로가 없으면 None
    async fn walking_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<f64>, AppError>;
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: f64,
}

// OSRM 이 "경로 없음" 으로 답하는 코드
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// OSRM 클라이언트
/// Walking distance from an OSRM routing server
pub struct OsrmClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RoutingApi for OsrmClient {
    async fn walking_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<f64>, AppError> {
        // OSRM 좌표 순서는 {longitude},{latitude}
        let url = format!(
            "{}/route/v1/foot/{},{};{},{}",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "osrm request failed");
            AppError::Internal(format!("osrm request failed: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "osrm response unreadable");
            AppError::Internal(format!("osrm response unreadable: {}", e))
        })?;

        let route: RouteResponse = match serde_json::from_str(&body) {
            Ok(route) => route,
            Err(e) => {
                tracing::error!(%status, %body, "osrm returned an unexpected body");
                return Err(AppError::Internal(format!("invalid osrm response: {}", e)));
            }
        };

        if route.code == "Ok" {
            return Ok(route.routes.first().map(|r| r.distance));
        }
        if NO_ROUTE_CODES.contains(&route.code.as_str()) {
            tracing::debug!(code = %route.code, "no walking route");
            return Ok(None);
        }

        tracing::error!(%status, %body, "osrm route failed");
        Err(AppError::Internal(format!("osrm returned code {}", route.code)))
    }
}
