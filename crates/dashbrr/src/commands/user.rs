//! `user create` and `user change-password`.

use std::sync::Arc;

use async_trait::async_trait;
use dashbrr_core::{Command, CommandContext, Error, NewUser, PasswordHasher, Result, UserStore};
use tracing::info;

const MIN_PASSWORD_LEN: usize = 8;

const USAGE: &str = "Usage: dashbrr run user <action> [arguments]

Actions:
  create <username> <password> [email]
  change-password <username> <new-password>

Examples:
  dashbrr run user create admin 'correct horse battery' admin@example.com
  dashbrr run user change-password admin 'new secret phrase'
";

pub struct UserCommand {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserCommand {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    fn usage_error(&self, action: &str) -> Error {
        Error::missing_arguments(format!("{} {action}", self.name()), USAGE)
    }

    fn check_password(&self, action: &str, password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::missing_arguments(
                format!("{} {action}", self.name()),
                format!("Password must be at least {MIN_PASSWORD_LEN} characters\n\n{USAGE}"),
            ));
        }
        Ok(())
    }

    async fn create(&self, username: &str, password: &str, email: Option<&str>) -> Result<()> {
        self.check_password("create", password)?;

        if self.users.user_by_username(username).await?.is_some() {
            return Err(Error::duplicate_user(format!("username '{username}' is taken")));
        }
        if let Some(email) = email {
            if self.users.user_by_email(email).await?.is_some() {
                return Err(Error::duplicate_user(format!("email '{email}' is in use")));
            }
        }

        let user = self
            .users
            .create_user(&NewUser {
                username: username.to_string(),
                email: email.map(str::to_string),
                password_hash: self.hasher.hash(password)?,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user created");
        println!("Created user {}", user.username);
        Ok(())
    }

    async fn change_password(&self, username: &str, password: &str) -> Result<()> {
        self.check_password("change-password", password)?;

        let user = self
            .users
            .user_by_username(username)
            .await?
            .ok_or_else(|| Error::not_found(format!("User '{username}'")))?;

        let hash = self.hasher.hash(password)?;
        if !self.users.update_user_password(user.id, &hash).await? {
            return Err(Error::not_found(format!("User '{username}'")));
        }

        info!(user_id = user.id, username = %user.username, "password changed");
        println!("Password updated for {}", user.username);
        Ok(())
    }
}

#[async_trait]
impl Command for UserCommand {
    fn name(&self) -> &str {
        "user"
    }

    fn description(&self) -> &str {
        "Manage users"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> Result<()> {
        match args {
            [action, username, password] if action == "create" => {
                self.create(username, password, None).await
            }
            [action, username, password, email] if action == "create" => {
                self.create(username, password, Some(email.as_str())).await
            }
            [action, username, password] if action == "change-password" => {
                self.change_password(username, password).await
            }
            [action, ..] if action == "create" || action == "change-password" => {
                Err(self.usage_error(action))
            }
            _ => Err(Error::missing_arguments(self.name(), USAGE)),
        }
    }
}
