//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//! Storage is in-memory: data is lost on process restart.

pub mod clock;
pub mod repository;

pub use clock::{FixedClock, SystemClock};
pub use repository::{
    InMemoryCommentRepository, InMemoryCommunityRepository, InMemoryPostRepository,
    InMemorySavedPostRepository, InMemoryVoteRepository,
};

#[cfg(test)]
mod tests;
