use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::error::RepoError;
use agora_core::ports::SavedPostRepository;

/// In-memory saved posts, per user in the order they were saved.
pub struct InMemorySavedPostRepository {
    store: RwLock<HashMap<Uuid, Vec<Uuid>>>,
}

impl InMemorySavedPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySavedPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SavedPostRepository for InMemorySavedPostRepository {
    async fn contains(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .get(&user_id)
            .is_some_and(|saved| saved.contains(&post_id)))
    }

    async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        let saved = store.entry(user_id).or_default();

        match saved.iter().position(|id| *id == post_id) {
            Some(index) => {
                saved.remove(index);
                Ok(false)
            }
            None => {
                saved.push(post_id);
                Ok(true)
            }
        }
    }

    async fn post_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_twice_unsaves() {
        let repo = InMemorySavedPostRepository::new();
        let (user, post) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(repo.toggle(user, post).await.unwrap());
        assert!(repo.contains(user, post).await.unwrap());
        assert!(!repo.toggle(user, post).await.unwrap());
        assert!(repo.post_ids(user).await.unwrap().is_empty());
    }
}
