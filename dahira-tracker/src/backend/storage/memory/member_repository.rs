use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use super::connection::MemoryConnection;
use crate::backend::domain::models::{Contribution, Member};
use crate::backend::storage::traits::MemberStorage;

/// In-memory repository for members and their embedded contributions
#[derive(Clone)]
pub struct MemberRepository {
    connection: MemoryConnection,
}

impl MemberRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MemberStorage for MemberRepository {
    async fn store_member(&self, member: &Member) -> Result<()> {
        let mut data = self.connection.data().write().await;
        data.members.push(member.clone());
        debug!("Stored member {} ({} total)", member.id, data.members.len());
        Ok(())
    }

    async fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        let data = self.connection.data().read().await;
        Ok(data.members.iter().find(|m| m.id == member_id).cloned())
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        let data = self.connection.data().read().await;
        Ok(data.members.clone())
    }

    async fn update_member(&self, member: &Member) -> Result<bool> {
        let mut data = self.connection.data().write().await;
        match data.members.iter_mut().find(|m| m.id == member.id) {
            Some(stored) => {
                let contributions = std::mem::take(&mut stored.contributions);
                *stored = Member {
                    contributions,
                    ..member.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_contribution(&self, contribution: &Contribution) -> Result<bool> {
        let mut data = self.connection.data().write().await;
        match data.members.iter_mut().find(|m| m.id == contribution.member_id) {
            Some(member) => {
                member.contributions.push(contribution.clone());
                debug!(
                    "Appended contribution {} to member {} ({} payments)",
                    contribution.id,
                    member.id,
                    member.contributions.len()
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_contributions(&self) -> Result<Vec<Contribution>> {
        let data = self.connection.data().read().await;
        Ok(data
            .members
            .iter()
            .flat_map(|m| m.contributions.iter().cloned())
            .collect())
    }
}
