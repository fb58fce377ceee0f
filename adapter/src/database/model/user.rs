use std::str::FromStr;

use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {}", row.role)))?;
        Ok(User {
            id: UserId::from(row.user_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
        })
    }
}

/// 認証時にのみ使うパスワードハッシュ付きの行。User には載せない。
#[derive(sqlx::FromRow)]
pub struct UserPasswordRow {
    pub user_id: Uuid,
    pub password_hash: String,
}
