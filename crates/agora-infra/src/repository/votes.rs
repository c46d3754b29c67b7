use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Post, Vote, VoteAction, VoteType};
use agora_core::error::RepoError;
use agora_core::ports::{PostRepository, VoteRepository};

/// In-memory vote store keyed by (post, user).
///
/// Writes the post tallies through `posts` while holding its own write lock, so
/// a vote record and its tally change are never observed apart.
pub struct InMemoryVoteRepository {
    store: RwLock<HashMap<(Uuid, Uuid), Vote>>,
    posts: Arc<dyn PostRepository>,
}

impl InMemoryVoteRepository {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            posts,
        }
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&(post_id, user_id)).cloned())
    }

    async fn record(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        requested: VoteType,
        at: DateTime<Utc>,
    ) -> Result<(VoteAction, Post), RepoError> {
        // Lock order is votes, then posts. The post store never takes this lock.
        let mut store = self.store.write().await;
        let key = (post_id, user_id);

        let existing = store.get(&key).map(|vote| vote.vote_type);
        let action = VoteAction::resolve(existing, requested);

        // A missing post fails here, before the vote is written.
        let post = self.posts.apply_tally(post_id, action.tally_delta()).await?;

        match (store.entry(key), action.resulting_vote()) {
            (Entry::Occupied(e), None) => {
                e.remove();
            }
            (Entry::Occupied(mut e), Some(vote_type)) => e.get_mut().vote_type = vote_type,
            (Entry::Vacant(e), Some(vote_type)) => {
                e.insert(Vote::new(post_id, user_id, vote_type, at));
            }
            (Entry::Vacant(_), None) => {}
        }

        tracing::debug!(%post_id, %user_id, action = action.name(), "Recorded vote");
        Ok((action, post))
    }
}
