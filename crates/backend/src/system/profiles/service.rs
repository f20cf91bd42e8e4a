use anyhow::Result;
use contracts::system::auth::UserProfile;

use super::repository;

/// Stored profile or the default one (`role = "COMEX"`)
pub async fn get_or_default(user_id: &str) -> Result<UserProfile> {
    Ok(with_default(user_id, repository::get_by_user_id(user_id).await?))
}

pub fn with_default(user_id: &str, stored: Option<UserProfile>) -> UserProfile {
    stored.unwrap_or_else(|| {
        tracing::debug!("No profile stored for user {}, using default", user_id);
        UserProfile::default_for(user_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_falls_back_to_comex() {
        assert_eq!(with_default("u1", None).role, "COMEX");
        let stored = UserProfile {
            user_id: "u1".into(),
            display_name: Some("Ana".into()),
            role: "ADMIN".into(),
        };
        assert_eq!(with_default("u1", Some(stored.clone())), stored);
    }
}
