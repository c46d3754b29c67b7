use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TallyDelta;
use crate::error::DomainError;

/// Longest title accepted for a new post, in characters.
pub const MAX_TITLE_LEN: usize = 300;

/// Post entity - a link or text submission inside a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by a user when submitting a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

impl NewPost {
    /// Check the submission and turn it into a post with no votes.
    pub fn into_post(self, created_at: DateTime<Utc>) -> Result<Post, DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Title must not be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        Ok(Post {
            id: Uuid::new_v4(),
            author_id: self.author_id,
            community_id: self.community_id,
            title: title.to_string(),
            content: self.content.filter(|c| !c.trim().is_empty()),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            upvotes: 0,
            downvotes: 0,
            created_at,
        })
    }
}

impl Post {
    /// Apply a vote tally change.
    ///
    /// Returns `false` and leaves the counters untouched when the change would
    /// take either of them below zero: that means votes and tallies disagree.
    #[must_use]
    pub fn apply_tally(&mut self, delta: TallyDelta) -> bool {
        match (
            self.upvotes.checked_add_signed(delta.up),
            self.downvotes.checked_add_signed(delta.down),
        ) {
            (Some(up), Some(down)) => {
                self.upvotes = up;
                self.downvotes = down;
                true
            }
            _ => false,
        }
    }
}
