//! `UserStore` over the `users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashbrr_core::{Error, NewUser, Result, User, UserStore};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const SELECT_COLUMNS: &str = "SELECT id, username, email, password_hash, created_at FROM users";

#[async_trait]
impl UserStore for Database {
    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query(&format!("{SELECT_COLUMNS} WHERE username = ?"))
            .bind(username)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| Error::database_error(format!("Failed to query user: {e}")))
            .and_then(|row| row.as_ref().map(parse_user_row).transpose())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query(&format!("{SELECT_COLUMNS} WHERE email = ?"))
            .bind(email)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(|e| Error::database_error(format!("Failed to query user: {e}")))
            .and_then(|row| row.as_ref().map(parse_user_row).transpose())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(user.email.as_deref())
        .bind(&user.password_hash)
        .bind(now.timestamp())
        .bind(now.timestamp())
        .execute(self.pool().await?)
        .await
        .map(|result| result.last_insert_rowid())
        .map_err(|e| {
            if e.to_string().to_lowercase().contains("unique") {
                Error::database_error(format!("User '{}' already exists", user.username))
            } else {
                Error::database_error(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
        })
    }

    async fn update_user_password(&self, user_id: i64, password_hash: &str) -> Result<bool> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(self.pool().await?)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(|e| Error::database_error(format!("Failed to update password: {e}")))
    }
}

fn parse_user_row(row: &SqliteRow) -> Result<User> {
    let column = |name: &str, e: sqlx::Error| {
        Error::database_error(format!("Failed to read {name}: {e}"))
    };

    let created_secs: i64 = row
        .try_get("created_at")
        .map_err(|e| column("created_at", e))?;
    let created_at = DateTime::<Utc>::from_timestamp(created_secs, 0).ok_or_else(|| {
        Error::database_error(format!("Invalid created_at timestamp: {created_secs}"))
    })?;

    Ok(User {
        id: row.try_get("id").map_err(|e| column("id", e))?,
        username: row.try_get("username").map_err(|e| column("username", e))?,
        email: row.try_get("email").map_err(|e| column("email", e))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| column("password_hash", e))?,
        created_at,
    })
}
