use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CommunityRepository, PostRepository};
use crate::ranking::{SortMode, rank_or_passthrough};

use super::{community_not_found, post_not_found};

/// Which slice of the feed to show and how to order it.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub community_id: Option<Uuid>,
    /// `None` keeps repository order (newest first).
    pub sort: Option<SortMode>,
    /// Applied after ranking.
    pub limit: Option<usize>,
}

/// Read side of the post feed, plus submission.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    communities: Arc<dyn CommunityRepository>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostRepository>, communities: Arc<dyn CommunityRepository>) -> Self {
        Self { posts, communities }
    }

    /// Load a snapshot of posts and rank it. Filtering on an unknown community is `NotFound`.
    pub async fn feed(&self, query: &FeedQuery, now: DateTime<Utc>) -> Result<Vec<Post>, DomainError> {
        if let Some(community_id) = query.community_id {
            self.ensure_community(community_id).await?;
        }

        let snapshot = self.posts.list(query.community_id).await?;
        let mut ranked = rank_or_passthrough(&snapshot, query.sort, now);
        if let Some(limit) = query.limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }

    pub async fn post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Validate and store a post. The target community must exist.
    pub async fn create_post(&self, new_post: NewPost, now: DateTime<Utc>) -> Result<Post, DomainError> {
        self.ensure_community(new_post.community_id).await?;
        let post = new_post.into_post(now)?;
        Ok(self.posts.save(post).await?)
    }

    async fn ensure_community(&self, id: Uuid) -> Result<(), DomainError> {
        match self.communities.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(community_not_found(id)),
        }
    }
}
