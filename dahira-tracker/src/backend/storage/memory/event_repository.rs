use anyhow::Result;
use async_trait::async_trait;

use super::connection::MemoryConnection;
use crate::backend::domain::models::DahiraEvent;
use crate::backend::storage::traits::DahiraEventStorage;

/// In-memory repository for gathering snapshots
#[derive(Clone)]
pub struct EventRepository {
    connection: MemoryConnection,
}

impl EventRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DahiraEventStorage for EventRepository {
    async fn store_event(&self, event: &DahiraEvent) -> Result<()> {
        let mut data = self.connection.data().write().await;
        data.events.push(event.clone());
        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<DahiraEvent>> {
        let data = self.connection.data().read().await;
        Ok(data.events.clone())
    }
}
