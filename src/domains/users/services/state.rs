// Users domain state
use std::sync::Arc;

use crate::domains::users::services::UserService;
use crate::shared::database::UserRepository;

/// Users domain state
#[derive(Clone)]
pub struct UserState {
    pub user_service: UserService,
}

impl UserState {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service: UserService::new(user_repository),
        }
    }
}
