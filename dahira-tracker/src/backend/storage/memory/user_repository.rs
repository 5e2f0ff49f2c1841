use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use shared::Role;

use super::connection::MemoryConnection;
use crate::backend::domain::models::User;
use crate::backend::storage::traits::{AccountUpdate, UserStorage};

/// In-memory repository for login accounts
#[derive(Clone)]
pub struct UserRepository {
    connection: MemoryConnection,
}

impl UserRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Apply a change to one user unless it would leave no active SUPER_ADMIN
    async fn update_guarded<F>(&self, user_id: &str, change: F) -> Result<AccountUpdate>
    where
        F: FnOnce(&mut User),
    {
        let mut data = self.connection.data().write().await;
        let Some(index) = data.users.iter().position(|u| u.id == user_id) else {
            return Ok(AccountUpdate::NotFound);
        };

        let mut updated = data.users[index].clone();
        change(&mut updated);

        let was_super_admin = data.users[index].active && data.users[index].is_super_admin();
        let stays_super_admin = updated.active && updated.is_super_admin();
        if was_super_admin && !stays_super_admin {
            let others = data
                .users
                .iter()
                .filter(|u| u.id != user_id && u.active && u.is_super_admin())
                .count();
            if others == 0 {
                return Ok(AccountUpdate::LastSuperAdmin(data.users[index].clone()));
            }
        }

        data.users[index] = updated.clone();
        debug!("Updated user {}", user_id);
        Ok(AccountUpdate::Updated(updated))
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        let mut data = self.connection.data().write().await;
        data.users.push(user.clone());
        debug!("Stored user {} ({} total)", user.id, data.users.len());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let data = self.connection.data().read().await;
        Ok(data.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let data = self.connection.data().read().await;
        Ok(data.users.clone())
    }

    async fn find_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        let data = self.connection.data().read().await;
        Ok(data.users.iter().filter(|u| u.email == email).cloned().collect())
    }

    async fn find_active_user_for_member(&self, member_id: &str) -> Result<Option<User>> {
        let data = self.connection.data().read().await;
        Ok(data
            .users
            .iter()
            .find(|u| u.active && u.member_id.as_deref() == Some(member_id))
            .cloned())
    }

    async fn toggle_user_status(&self, user_id: &str) -> Result<AccountUpdate> {
        self.update_guarded(user_id, |user| user.active = !user.active).await
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> Result<AccountUpdate> {
        self.update_guarded(user_id, |user| user.role = role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str, member_id: Option<&str>, active: bool) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: email.to_string(),
            role: Role::Viewer,
            member_id: member_id.map(str::to_string),
            password_hash: None,
            active,
        }
    }

    #[tokio::test]
    async fn test_store_and_list_users() {
        let repo = UserRepository::new(MemoryConnection::new());
        repo.store_user(&user("1", "a@b.com", None, true)).await.unwrap();
        repo.store_user(&user("2", "c@d.com", None, true)).await.unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "1");
        assert!(repo.get_user("2").await.unwrap().is_some());
        assert!(repo.get_user("3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_active_user_for_member_skips_inactive() {
        let repo = UserRepository::new(MemoryConnection::new());
        repo.store_user(&user("1", "a@b.com", Some("m1"), false)).await.unwrap();
        repo.store_user(&user("2", "a2@b.com", Some("m1"), true)).await.unwrap();

        let found = repo.find_active_user_for_member("m1").await.unwrap().unwrap();
        assert_eq!(found.id, "2");
        assert!(repo.find_active_user_for_member("m2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_and_role_update_on_missing_user() {
        let repo = UserRepository::new(MemoryConnection::new());
        assert_eq!(repo.toggle_user_status("nope").await.unwrap(), AccountUpdate::NotFound);
        assert_eq!(
            repo.update_user_role("nope", Role::Admin).await.unwrap(),
            AccountUpdate::NotFound
        );
    }

    #[tokio::test]
    async fn test_toggle_flips_active_flag() {
        let repo = UserRepository::new(MemoryConnection::new());
        repo.store_user(&user("1", "a@b.com", None, true)).await.unwrap();

        let AccountUpdate::Updated(toggled) = repo.toggle_user_status("1").await.unwrap() else {
            panic!("expected an update");
        };
        assert!(!toggled.active);
        let AccountUpdate::Updated(toggled) = repo.toggle_user_status("1").await.unwrap() else {
            panic!("expected an update");
        };
        assert!(toggled.active);
    }

    #[tokio::test]
    async fn test_last_super_admin_guard_holds_under_concurrent_demotion() {
        let repo = UserRepository::new(MemoryConnection::new());
        for id in ["1", "2"] {
            let mut admin = user(id, &format!("{}@dahira.com", id), None, true);
            admin.role = Role::SuperAdmin;
            repo.store_user(&admin).await.unwrap();
        }

        let first = repo.clone();
        let second = repo.clone();
        let (a, b) = tokio::join!(
            tokio::spawn(async move { first.update_user_role("1", Role::Admin).await.unwrap() }),
            tokio::spawn(async move { second.toggle_user_status("2").await.unwrap() }),
        );
        let outcomes = [a.unwrap(), b.unwrap()];
        let refused = outcomes
            .iter()
            .filter(|o| matches!(o, AccountUpdate::LastSuperAdmin(_)))
            .count();
        assert_eq!(refused, 1);

        let remaining = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.active && u.is_super_admin())
            .count();
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_super_admin_keeping_role_is_not_blocked() {
        let repo = UserRepository::new(MemoryConnection::new());
        let mut admin = user("1", "a@b.com", None, true);
        admin.role = Role::SuperAdmin;
        repo.store_user(&admin).await.unwrap();

        let outcome = repo.update_user_role("1", Role::SuperAdmin).await.unwrap();
        assert!(matches!(outcome, AccountUpdate::Updated(_)));
        let outcome = repo.update_user_role("1", Role::Viewer).await.unwrap();
        assert!(matches!(outcome, AccountUpdate::LastSuperAdmin(ref u) if u.role == Role::SuperAdmin));
    }
}
