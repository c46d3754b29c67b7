//! In-memory repository implementations.
//!
//! Each store guards its data with an async `RwLock`. Reads clone a snapshot and
//! release the lock before the caller ranks or filters anything.

mod comments;
mod communities;
mod posts;
mod saved;
mod votes;

pub use comments::InMemoryCommentRepository;
pub use communities::InMemoryCommunityRepository;
pub use posts::InMemoryPostRepository;
pub use saved::InMemorySavedPostRepository;
pub use votes::InMemoryVoteRepository;
