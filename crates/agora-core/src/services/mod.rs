//! Application services - orchestrate ports and the ranking engine.
//!
//! Services take `now` as an argument wherever time matters, so callers decide
//! which [`Clock`](crate::ports::Clock) backs a request.

mod comments;
mod communities;
mod feed;
mod saved;
mod voting;

pub use comments::CommentService;
pub use communities::CommunityService;
pub use feed::{FeedQuery, FeedService};
pub use saved::SavedPostService;
pub use voting::{VoteOutcome, VotingService};

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

fn post_not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn community_not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Community",
        id,
    }
}

fn map_post_error(id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    }
}
