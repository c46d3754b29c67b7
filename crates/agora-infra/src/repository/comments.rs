use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::Comment;
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, CommentRepository};

/// In-memory comment store. Keeps insertion order so equal timestamps list stably.
pub struct InMemoryCommentRepository {
    store: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|c| c.id == id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|c| c.id == comment.id) {
            Some(existing) => *existing = comment.clone(),
            None => store.push(comment.clone()),
        }
        tracing::debug!(comment_id = %comment.id, post_id = %comment.post_id, "Saved comment");
        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut comments: Vec<Comment> = {
            let store = self.store.read().await;
            store.iter().filter(|c| c.post_id == post_id).cloned().collect()
        };
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn count_by_post(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, usize>, RepoError> {
        let store = self.store.read().await;
        let mut counts = HashMap::new();
        for comment in store.iter().filter(|c| post_ids.contains(&c.post_id)) {
            *counts.entry(comment.post_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
