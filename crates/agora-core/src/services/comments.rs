use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, NewComment};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CommentRepository, PostRepository};

use super::post_not_found;

/// Comments on posts, flat with parent links.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Add a comment to a post. A reply's parent must be a comment on the same post.
    pub async fn add(
        &self,
        post_id: Uuid,
        new_comment: NewComment,
        now: DateTime<Utc>,
    ) -> Result<Comment, DomainError> {
        self.ensure_post(post_id).await?;

        if let Some(parent_id) = new_comment.parent_id {
            let parent = self
                .comments
                .find_by_id(parent_id)
                .await?
                .ok_or(DomainError::NotFound {
                    entity_type: "Comment",
                    id: parent_id,
                })?;
            if parent.post_id != post_id {
                return Err(DomainError::Validation(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
        }

        let comment = new_comment.into_comment(post_id, now)?;
        Ok(self.comments.save(comment).await?)
    }

    /// Comments on a post, oldest first.
    pub async fn list(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.ensure_post(post_id).await?;
        Ok(self.comments.list_for_post(post_id).await?)
    }

    /// Comment totals per post, zero for posts with none.
    pub async fn counts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, usize>, DomainError> {
        let mut counts = self.comments.count_by_post(post_ids).await?;
        for id in post_ids {
            counts.entry(*id).or_insert(0);
        }
        Ok(counts)
    }

    async fn ensure_post(&self, id: Uuid) -> Result<(), DomainError> {
        match self.posts.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(post_not_found(id)),
        }
    }
}
