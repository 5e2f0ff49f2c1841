use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::domain::models::{DahiraEvent, Member, TourSchedule, User};

/// Every collection held by the process
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub users: Vec<User>,
    pub members: Vec<Member>,
    pub events: Vec<DahiraEvent>,
    pub schedules: Vec<TourSchedule>,
}

/// MemoryConnection is the single owner of the in-process data set.
///
/// Clones share the same data; writes are serialized through the lock so a
/// read-modify-write such as the upsert-by-date never interleaves with
/// another writer.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    data: Arc<RwLock<DataSet>>,
}

impl MemoryConnection {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records
    pub fn with_data(data: DataSet) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub(crate) fn data(&self) -> &RwLock<DataSet> {
        &self.data
    }

    /// Copy of everything currently stored
    pub async fn snapshot(&self) -> DataSet {
        self.data.read().await.clone()
    }
}
