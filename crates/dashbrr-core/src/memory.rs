//! In-memory implementations of the store contracts.
//!
//! Used by tests and by callers that want a throwaway registry without a
//! database file. They enforce the same uniqueness rules as the SQLite store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Error, NewUser, Result, ServiceRecord, ServiceStore, User, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryServiceStore {
    records: RwLock<Vec<ServiceRecord>>,
}

impl InMemoryServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl ServiceStore for InMemoryServiceStore {
    async fn create_service(&self, record: &ServiceRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.instance_id == record.instance_id) {
            return Err(Error::database_error(format!(
                "Service '{}' already exists",
                record.instance_id
            )));
        }
        if records.iter().any(|r| r.url == record.url) {
            return Err(Error::database_error(format!(
                "Service URL '{}' already exists",
                record.url
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn delete_service(&self, instance_id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.instance_id != instance_id);
        Ok(records.len() != before)
    }

    async fn all_services(&self) -> Result<Vec<ServiceRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_service_by_url(&self, url: &str) -> Result<Option<ServiceRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.url == url)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(Error::database_error(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        if let Some(email) = user.email.as_deref() {
            if users.iter().any(|u| u.email.as_deref() == Some(email)) {
                return Err(Error::database_error(format!(
                    "Email '{email}' already in use"
                )));
            }
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let created = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user_password(&self, user_id: i64, password_hash: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        Ok(users
            .iter_mut()
            .find(|u| u.id == user_id)
            .map(|u| u.password_hash = password_hash.to_string())
            .is_some())
    }
}
