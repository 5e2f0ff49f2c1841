//! User account management: creation, activation and roles.
//!
//! ## Business Rules
//!
//! - Names are required, emails must contain '@'
//! - Passwords are hashed before they reach storage
//! - The last active SUPER_ADMIN can be neither demoted nor deactivated

use anyhow::Result;
use log::{info, warn};
use shared::Role;
use std::sync::Arc;

use crate::backend::domain::commands::user::CreateUserCommand;
use crate::backend::domain::credentials::CredentialVerifier;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::User;
use crate::backend::storage::{AccountUpdate, UserStorage};

pub const SYSTEM_USER_NAME: &str = "Système";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStorage>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStorage>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { users, verifier }
    }

    /// Create an active account
    pub async fn add_user(&self, command: CreateUserCommand) -> Result<User> {
        info!("Adding user: {} ({})", command.email, command.role);

        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DahiraError::validation("User name cannot be empty").into());
        }
        let email = command.email.trim().to_string();
        if !email.contains('@') {
            return Err(DahiraError::validation(format!("Invalid email address: {}", email)).into());
        }

        let password_hash = match command.password.as_deref().map(str::trim) {
            Some(password) if !password.is_empty() => Some(self.verifier.hash_password(password)?),
            _ => None,
        };

        let user = User {
            id: User::generate_id(),
            name,
            email,
            role: command.role,
            member_id: command.member_id.filter(|id| !id.trim().is_empty()),
            password_hash,
            active: true,
        };

        self.users.store_user(&user).await?;
        info!("Added user {} with ID: {}", user.email, user.id);
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list_users().await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.users.get_user(user_id).await
    }

    /// Activate an inactive account or deactivate an active one
    pub async fn toggle_user_status(&self, user_id: &str) -> Result<User> {
        let outcome = self.users.toggle_user_status(user_id).await?;
        let updated = Self::applied(outcome, user_id, "deactivate")?;
        info!(
            "User {} is now {}",
            updated.email,
            if updated.active { "active" } else { "inactive" }
        );
        Ok(updated)
    }

    pub async fn update_user_role(&self, user_id: &str, role: Role) -> Result<User> {
        let outcome = self.users.update_user_role(user_id, role).await?;
        let updated = Self::applied(outcome, user_id, "demote")?;
        info!("User {} role is now {}", updated.email, updated.role);
        Ok(updated)
    }

    /// Display name for a user ID, "Système" when absent
    pub async fn user_name(&self, user_id: &str) -> Result<String> {
        Ok(self
            .users
            .get_user(user_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| SYSTEM_USER_NAME.to_string()))
    }

    fn applied(outcome: AccountUpdate, user_id: &str, action: &str) -> Result<User> {
        match outcome {
            AccountUpdate::Updated(user) => Ok(user),
            AccountUpdate::NotFound => {
                warn!("User not found: {}", user_id);
                Err(DahiraError::not_found("User", user_id).into())
            }
            AccountUpdate::LastSuperAdmin(user) => {
                warn!("Refused to {} the last active super admin {}", action, user.email);
                Err(DahiraError::validation(format!("Cannot {} the last active super admin", action)).into())
            }
        }
    }
}
