use contracts::system::auth::UserProfile;

use crate::shared::api_utils::authorized_get;

/// Profile of the signed-in user; the server answers with a default role
/// when none is stored.
pub async fn get_my_profile(access_token: &str) -> Result<UserProfile, String> {
    authorized_get("/api/system/profile/me", access_token).await
}
