use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest comment body accepted, in characters.
pub const MAX_COMMENT_LEN: usize = 10_000;

/// Comment entity - a reply to a post, or to another comment on the same post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    /// `None` for top-level comments.
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when commenting.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}

impl NewComment {
    pub fn into_comment(self, post_id: Uuid, created_at: DateTime<Utc>) -> Result<Comment, DomainError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("Comment must not be empty".to_string()));
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(DomainError::Validation(format!(
                "Comment must be at most {MAX_COMMENT_LEN} characters"
            )));
        }

        Ok(Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            content: content.to_string(),
            upvotes: 0,
            downvotes: 0,
            created_at,
        })
    }
}
