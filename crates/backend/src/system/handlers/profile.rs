use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::UserProfile;

use crate::system::auth::extractor::SignedInUser;
use crate::system::profiles::service;

/// Profile of the signed-in user, default role when none is stored
pub async fn my_profile(user: SignedInUser) -> Result<Json<UserProfile>, StatusCode> {
    service::get_or_default(&user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to load profile for {}: {}", user.user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
