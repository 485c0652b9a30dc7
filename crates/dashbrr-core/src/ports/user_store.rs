//! User persistence and password hashing contracts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Replace the stored hash. Returns `false` when no such user exists.
    async fn update_user_password(&self, user_id: i64, password_hash: &str) -> Result<bool>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}
