//! Dashboard accounts. Password hashes never leave the backend.

use serde::{Deserialize, Serialize};

use super::auth::UserInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    /// Inactive accounts cannot sign in or refresh
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl UserAccount {
    /// Public part sent to the browser after sign-in
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Account to create, with the plain password to hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserAccount {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_drops_account_state() {
        let account = UserAccount {
            id: "u-1".into(),
            username: "admin".into(),
            full_name: Some("Administrator".into()),
            is_active: true,
            is_admin: true,
            created_at: "2024-01-01T00:00:00Z".into(),
            last_login_at: None,
        };
        let info = account.info();
        assert_eq!(info.username, "admin");
        assert!(info.is_admin);
        assert_eq!(info.full_name.as_deref(), Some("Administrator"));
    }
}
