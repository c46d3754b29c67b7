use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, VoteAction, VoteType};
use crate::error::DomainError;
use crate::ports::VoteRepository;

use super::map_post_error;

/// Result of casting a vote: what happened and the post's new counters.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub action: VoteAction,
    pub post: Post,
}

/// Casts votes. The repository keeps vote records and post tallies in step.
#[derive(Clone)]
pub struct VotingService {
    votes: Arc<dyn VoteRepository>,
}

impl VotingService {
    pub fn new(votes: Arc<dyn VoteRepository>) -> Self {
        Self { votes }
    }

    /// Cast, retract or switch `user_id`'s vote on `post_id`.
    pub async fn cast_vote(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        vote_type: VoteType,
        now: DateTime<Utc>,
    ) -> Result<VoteOutcome, DomainError> {
        let (action, post) = self
            .votes
            .record(post_id, user_id, vote_type, now)
            .await
            .map_err(map_post_error(post_id))?;

        Ok(VoteOutcome { action, post })
    }

    /// The vote `user_id` currently holds on `post_id`, if any.
    pub async fn current_vote(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<VoteType>, DomainError> {
        Ok(self
            .votes
            .find(post_id, user_id)
            .await?
            .map(|vote| vote.vote_type))
    }
}
