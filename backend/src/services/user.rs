//! User lookup shared by the dashboard and coach routes

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// User service
pub struct UserService;

impl UserService {
    /// Load a user or fail with 404
    pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<UserRecord, ApiError> {
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
