use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository, SavedPostRepository};
use crate::ranking::{SortMode, rank_or_passthrough};

use super::post_not_found;

/// Per-user saved posts.
#[derive(Clone)]
pub struct SavedPostService {
    posts: Arc<dyn PostRepository>,
    saved: Arc<dyn SavedPostRepository>,
}

impl SavedPostService {
    pub fn new(posts: Arc<dyn PostRepository>, saved: Arc<dyn SavedPostRepository>) -> Self {
        Self { posts, saved }
    }

    /// Save the post if it is not saved yet, otherwise unsave it. Returns the new state.
    pub async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(post_not_found(post_id));
        }
        Ok(self.saved.toggle(user_id, post_id).await?)
    }

    pub async fn is_saved(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.saved.contains(user_id, post_id).await?)
    }

    /// The user's saved posts, ranked like any other feed.
    pub async fn saved_feed(
        &self,
        user_id: Uuid,
        sort: Option<SortMode>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        let ids = self.saved.post_ids(user_id).await?;
        let snapshot = self.posts.find_many(&ids).await?;
        Ok(rank_or_passthrough(&snapshot, sort, now))
    }
}
