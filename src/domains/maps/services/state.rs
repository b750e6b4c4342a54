// Maps domain state
use std::sync::Arc;

use crate::domains::maps::services::MapService;
use crate::shared::clients::RoutingApi;
use crate::shared::database::MapRepository;

/// Maps domain state
#[derive(Clone)]
pub struct MapState {
    pub map_service: MapService,
}

impl MapState {
    pub fn new(
        map_repository: Arc<dyn MapRepository>,
        routing: Arc<dyn RoutingApi>,
        default_image: String,
    ) -> Self {
        Self {
            map_service: MapService::new(map_repository, routing, default_image),
        }
    }
}
