use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::Community;
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, CommunityRepository};

/// In-memory community store keyed by community ID.
pub struct InMemoryCommunityRepository {
    store: RwLock<HashMap<Uuid, Community>>,
}

impl InMemoryCommunityRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCommunityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Community, Uuid> for InMemoryCommunityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Community>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, community: Community) -> Result<Community, RepoError> {
        let mut store = self.store.write().await;
        // Checked under the write lock so two creates cannot both claim a name.
        if store
            .values()
            .any(|c| c.id != community.id && c.name == community.name)
        {
            return Err(RepoError::Conflict(format!(
                "community name '{}' is taken",
                community.name
            )));
        }
        tracing::debug!(community_id = %community.id, name = %community.name, "Saving community");
        store.insert(community.id, community.clone());
        Ok(community)
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCommunityRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Community>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Community>, RepoError> {
        let mut communities: Vec<Community> = {
            let store = self.store.read().await;
            store.values().cloned().collect()
        };
        communities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        Ok(communities)
    }
}
