use serde::{Deserialize, Serialize};

/// Role assumed when a user has no stored profile
pub const DEFAULT_PROFILE_ROLE: &str = "COMEX";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}

/// Per-user profile keyed by user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub role: String,
}

impl UserProfile {
    /// Profile served when the user has none stored
    pub fn default_for(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: None,
            role: DEFAULT_PROFILE_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_role() {
        let p = UserProfile::default_for("u-1");
        assert_eq!(p.role, "COMEX");
        assert_eq!(p.user_id, "u-1");
        assert!(p.display_name.is_none());
    }
}
