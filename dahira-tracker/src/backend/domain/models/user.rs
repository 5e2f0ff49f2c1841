//! Domain model for a login account.
use serde::{Deserialize, Serialize};
use shared::Role;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub member_id: Option<String>,
    /// PHC-formatted Argon2 hash; accounts created through Google sign-in have none
    pub password_hash: Option<String>,
    pub active: bool,
}

impl User {
    pub fn generate_id() -> String {
        format!("user::{}", Uuid::new_v4())
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}
