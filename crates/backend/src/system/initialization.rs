use anyhow::Result;
use contracts::system::auth::UserProfile;
use contracts::system::users::NewUserAccount;

use crate::shared::config::AuthConfig;
use crate::system::profiles::repository as profiles;
use crate::system::users::{repository, service};

/// Create the configured admin account when the users table is empty
pub async fn ensure_admin_user_exists(auth: &AuthConfig) -> Result<()> {
    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin_id = service::create(NewUserAccount {
        username: auth.default_admin_username.clone(),
        password: auth.default_admin_password.clone(),
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    })
    .await?;

    profiles::upsert(&UserProfile {
        user_id: admin_id.clone(),
        display_name: Some("Administrator".to_string()),
        role: "ADMIN".to_string(),
    })
    .await?;

    tracing::warn!(
        "Default admin user '{}' created (id {}). Change the password.",
        auth.default_admin_username,
        admin_id
    );
    Ok(())
}
