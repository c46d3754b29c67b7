use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Community, Post, TallyDelta, Vote, VoteAction, VoteType};
use crate::error::RepoError;

/// Generic repository trait: lookup and upsert by ID.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, or only those of one community, newest first.
    async fn list(&self, community_id: Option<Uuid>) -> Result<Vec<Post>, RepoError>;

    /// Posts with the given IDs, newest first. Unknown IDs are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError>;

    /// Adjust vote counters in place and return the updated post.
    ///
    /// Fails with [`RepoError::Conflict`] when a counter would go negative.
    async fn apply_tally(&self, id: Uuid, delta: TallyDelta) -> Result<Post, RepoError>;
}

/// Vote storage. One vote per (post, user).
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The user's current vote on a post.
    async fn find(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, RepoError>;

    /// Resolve `requested` against the stored vote with [`VoteAction::resolve`],
    /// apply the resulting tally change to the post and persist the vote, all as
    /// one atomic step. Returns the action and the updated post.
    ///
    /// Fails with [`RepoError::NotFound`], writing nothing, when the post does not exist.
    async fn record(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        requested: VoteType,
        at: DateTime<Utc>,
    ) -> Result<(VoteAction, Post), RepoError>;
}

/// Per-user bookmarks.
#[async_trait]
pub trait SavedPostRepository: Send + Sync {
    async fn contains(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;

    /// Flip the saved flag and return the new state.
    async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;

    async fn post_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;
}

/// Community repository. Names are unique.
#[async_trait]
pub trait CommunityRepository: BaseRepository<Community, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Community>, RepoError>;

    /// All communities, newest first.
    async fn list(&self) -> Result<Vec<Community>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Comment totals for the given posts. Posts without comments are absent.
    async fn count_by_post(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, usize>, RepoError>;
}
