use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{NewUserAccount, UserAccount};

use super::repository;
use crate::system::auth::password;

pub async fn create(account: NewUserAccount) -> Result<String> {
    if account.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }
    if repository::get_with_hash_by_username(&account.username)
        .await?
        .is_some()
    {
        return Err(anyhow::anyhow!("Username already exists"));
    }
    password::validate_password_strength(&account.password)?;
    let password_hash = password::hash_password(&account.password)?;

    let user = UserAccount {
        id: uuid::Uuid::new_v4().to_string(),
        username: account.username.trim().to_string(),
        full_name: account.full_name,
        is_active: true,
        is_admin: account.is_admin,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    };
    repository::create_with_password(&user, &password_hash).await?;
    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<UserAccount>> {
    repository::get_by_id(id).await
}

/// Active user matching the credentials, `None` otherwise
pub async fn verify_credentials(username: &str, password_plain: &str) -> Result<Option<UserAccount>> {
    let Some((user, hash)) = repository::get_with_hash_by_username(username.trim()).await? else {
        return Ok(None);
    };
    if !user.is_active || !password::verify_password(password_plain, &hash) {
        return Ok(None);
    }
    repository::touch_last_login(&user.id, &Utc::now().to_rfc3339()).await?;
    Ok(Some(user))
}
