use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Post, TallyDelta};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, PostRepository};

/// In-memory post store keyed by post ID.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository pre-filled with `posts`.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            store: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        // ID breaks timestamp ties so repeated reads agree.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        tracing::debug!(post_id = %post.id, community_id = %post.community_id, "Saving post");
        store.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, community_id: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        let snapshot: Vec<Post> = {
            let store = self.store.read().await;
            store
                .values()
                .filter(|p| community_id.is_none_or(|c| p.community_id == c))
                .cloned()
                .collect()
        };
        Ok(Self::newest_first(snapshot))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let snapshot: Vec<Post> = {
            let store = self.store.read().await;
            ids.iter().filter_map(|id| store.get(id).cloned()).collect()
        };
        Ok(Self::newest_first(snapshot))
    }

    async fn apply_tally(&self, id: Uuid, delta: TallyDelta) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        if !post.apply_tally(delta) {
            tracing::error!(post_id = %id, ?delta, "Vote tally would go negative");
            return Err(RepoError::Conflict(format!(
                "vote tally of post {id} would go negative"
            )));
        }
        tracing::debug!(
            post_id = %id,
            upvotes = post.upvotes,
            downvotes = post.downvotes,
            "Updated vote tally"
        );
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::NewPost;
    use chrono::Utc;

    #[tokio::test]
    async fn test_apply_tally_rejects_negative_counts() {
        let post = NewPost {
            author_id: Uuid::new_v4(),
            community_id: Uuid::new_v4(),
            title: "tally".to_string(),
            content: None,
            image_url: None,
        }
        .into_post(Utc::now())
        .unwrap();
        let repo = InMemoryPostRepository::with_posts([post.clone()]);

        let err = repo
            .apply_tally(post.id, TallyDelta { up: -1, down: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));

        let updated = repo
            .apply_tally(post.id, TallyDelta { up: 1, down: 0 })
            .await
            .unwrap();
        assert_eq!(updated.upvotes, 1);

        let missing = repo.apply_tally(Uuid::new_v4(), TallyDelta::default()).await;
        assert!(matches!(missing, Err(RepoError::NotFound)));
    }
}
