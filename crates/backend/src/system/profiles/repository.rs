use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::UserProfile;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

pub async fn get_by_user_id(user_id: &str) -> Result<Option<UserProfile>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id, display_name, role FROM sys_user_profiles WHERE user_id = ?",
            [user_id.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(UserProfile {
            user_id: row.try_get("", "user_id")?,
            display_name: row.try_get("", "display_name")?,
            role: row.try_get("", "role")?,
        })),
        None => Ok(None),
    }
}

pub async fn upsert(profile: &UserProfile) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_user_profiles (user_id, display_name, role, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET display_name = excluded.display_name,
                role = excluded.role, updated_at = excluded.updated_at",
            [
                profile.user_id.clone().into(),
                profile.display_name.clone().into(),
                profile.role.clone().into(),
                Utc::now().to_rfc3339().into(),
            ],
        ))
        .await?;
    Ok(())
}
