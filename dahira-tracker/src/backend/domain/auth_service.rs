//! Authentication domain logic for the Dahira tracker.
//!
//! Resolves a login identifier to an [`Identity`]:
//!
//! 1. an active account whose email matches and whose password verifies;
//! 2. otherwise a member whose phone matches (whitespace ignored) and whose
//!    phone code passes the [`CredentialVerifier`];
//! 3. that member's linked active account if there is one, else a
//!    non-persisted member session.
//!
//! Google sign-in provisions accounts on first use, see [`AccountLink`].

use anyhow::Result;
use log::{info, warn};
use shared::Role;
use std::sync::Arc;

use crate::backend::config::DahiraConfig;
use crate::backend::domain::credentials::CredentialVerifier;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::member::strip_whitespace;
use crate::backend::domain::models::{Member, User};
use crate::backend::storage::{MemberStorage, UserStorage};

/// Who is using the application
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// A persisted login account
    SystemAccount(User),
    /// A member authenticated by phone without a linked account.
    /// Nothing is persisted for it.
    MemberSession { member_id: String, display_name: String },
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::SystemAccount(user) => user.role,
            Identity::MemberSession { .. } => Role::Member,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::SystemAccount(user) => Some(&user.id),
            Identity::MemberSession { .. } => None,
        }
    }

    pub fn member_id(&self) -> Option<&str> {
        match self {
            Identity::SystemAccount(user) => user.member_id.as_deref(),
            Identity::MemberSession { member_id, .. } => Some(member_id),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Identity::SystemAccount(user) => &user.name,
            Identity::MemberSession { display_name, .. } => display_name,
        }
    }
}

/// How a Google email relates to the stored records
#[derive(Debug, Clone, PartialEq)]
pub enum AccountLink {
    /// Neither an account nor a member uses this email
    Unlinked,
    /// A member uses this email but no account does yet
    MemberLinked { member_id: String },
    /// An account with this email already exists
    SystemUser { user_id: String },
}

/// Outcome of a Google sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleLogin {
    pub user: User,
    pub link: AccountLink,
    /// True when this sign-in created the account
    pub created: bool,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStorage>,
    members: Arc<dyn MemberStorage>,
    verifier: Arc<dyn CredentialVerifier>,
    config: Arc<DahiraConfig>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStorage>,
        members: Arc<dyn MemberStorage>,
        verifier: Arc<dyn CredentialVerifier>,
        config: Arc<DahiraConfig>,
    ) -> Self {
        Self {
            users,
            members,
            verifier,
            config,
        }
    }

    /// Resolve an email or phone number plus secret. `None` means no match.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Option<Identity>> {
        let identifier = identifier.trim();
        info!("Login attempt for '{}'", identifier);

        if let Some(user) = self.find_password_account(identifier, secret).await? {
            info!("Login succeeded for account {}", user.id);
            return Ok(Some(Identity::SystemAccount(user)));
        }

        if !self.config.phone_login_enabled {
            info!("Login failed for '{}' (phone login disabled)", identifier);
            return Ok(None);
        }

        let member = match self.find_member_by_phone(identifier).await? {
            Some(member) => member,
            None => {
                info!("Login failed for '{}'", identifier);
                return Ok(None);
            }
        };

        if !self.verifier.verify_phone_code(&member, secret) {
            info!("Phone login rejected for member {}", member.id);
            return Ok(None);
        }

        if let Some(user) = self.users.find_active_user_for_member(&member.id).await? {
            info!("Phone login resolved member {} to account {}", member.id, user.id);
            return Ok(Some(Identity::SystemAccount(user)));
        }

        info!("Phone login opened a member session for {}", member.id);
        Ok(Some(Identity::MemberSession {
            display_name: member.full_name(),
            member_id: member.id,
        }))
    }

    /// Classify an email against existing accounts and members
    pub async fn resolve_account_link(&self, email: &str) -> Result<AccountLink> {
        let email = email.trim();
        if let Some(user) = self.users.find_users_by_email(email).await?.into_iter().next() {
            return Ok(AccountLink::SystemUser { user_id: user.id });
        }
        let members = self.members.list_members().await?;
        Ok(members
            .into_iter()
            .find(|m| m.email.as_deref() == Some(email))
            .map(|m| AccountLink::MemberLinked { member_id: m.id })
            .unwrap_or(AccountLink::Unlinked))
    }

    /// Sign in with a Google-verified email, provisioning a MEMBER account on first use
    pub async fn login_with_google(&self, email: &str) -> Result<GoogleLogin> {
        let email = email.trim().to_string();
        if !email.contains('@') {
            return Err(DahiraError::validation(format!("Invalid email address: {}", email)).into());
        }
        info!("Google sign-in for {}", email);

        let existing = self.users.find_users_by_email(&email).await?;
        if let Some(user) = existing.iter().find(|u| u.active) {
            return Ok(GoogleLogin {
                link: AccountLink::SystemUser {
                    user_id: user.id.clone(),
                },
                user: user.clone(),
                created: false,
            });
        }
        if !existing.is_empty() {
            warn!("Google sign-in refused for disabled account {}", email);
            return Err(DahiraError::AccountDisabled(email).into());
        }

        let link = self.resolve_account_link(&email).await?;
        let user = match &link {
            AccountLink::MemberLinked { member_id } => {
                let member = self
                    .members
                    .get_member(member_id)
                    .await?
                    .ok_or_else(|| DahiraError::not_found("Member", member_id.as_str()))?;
                new_member_account(&email, member.full_name(), Some(member.id))
            }
            AccountLink::Unlinked => new_member_account(&email, email.clone(), None),
            AccountLink::SystemUser { user_id } => {
                // Only reachable if an account appeared between the two reads
                let user = self
                    .users
                    .get_user(user_id)
                    .await?
                    .ok_or_else(|| DahiraError::not_found("User", user_id.as_str()))?;
                return Ok(GoogleLogin {
                    user,
                    link,
                    created: false,
                });
            }
        };

        self.users.store_user(&user).await?;
        info!("Provisioned account {} for {} ({:?})", user.id, email, link);
        Ok(GoogleLogin {
            user,
            link,
            created: true,
        })
    }

    async fn find_password_account(&self, email: &str, password: &str) -> Result<Option<User>> {
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }
        for user in self.users.find_users_by_email(email).await? {
            if !user.active {
                continue;
            }
            let Some(hash) = user.password_hash.as_deref() else {
                continue;
            };
            if self.verifier.verify_password(password, hash)? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn find_member_by_phone(&self, identifier: &str) -> Result<Option<Member>> {
        let phone = strip_whitespace(identifier);
        if phone.is_empty() {
            return Ok(None);
        }
        let members = self.members.list_members().await?;
        Ok(members.into_iter().find(|m| m.compact_phone() == phone))
    }
}

fn new_member_account(email: &str, name: String, member_id: Option<String>) -> User {
    User {
        id: User::generate_id(),
        name,
        email: email.to_string(),
        role: Role::Member,
        member_id,
        password_hash: None,
        active: true,
    }
}
