//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::SortMode;
use agora_core::ports::{
    Clock, CommentRepository, CommunityRepository, PostRepository, SavedPostRepository,
    VoteRepository,
};
use agora_core::services::{
    CommentService, CommunityService, FeedService, SavedPostService, VotingService,
};
use agora_infra::{
    InMemoryCommentRepository, InMemoryCommunityRepository, InMemoryPostRepository,
    InMemorySavedPostRepository, InMemoryVoteRepository, SystemClock,
};

use crate::config::AppConfig;
use crate::seed;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub voting: VotingService,
    pub saved: SavedPostService,
    pub communities: CommunityService,
    pub comments: CommentService,
    pub clock: Arc<dyn Clock>,
    pub default_sort: SortMode,
    pub feed_max_limit: usize,
}

impl AppState {
    /// Build the application state backed by in-memory storage and the wall clock.
    pub async fn new(config: &AppConfig) -> Self {
        let state = Self::with_clock(config, Arc::new(SystemClock));

        if config.seed_demo_posts {
            let seeded = seed::seed_demo_posts(&state, state.clock.now()).await;
            tracing::info!(posts = seeded, "Seeded demo posts");
        }

        tracing::info!(default_sort = %state.default_sort, "Application state initialized");
        state
    }

    /// Build the application state around a given clock.
    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let votes: Arc<dyn VoteRepository> = Arc::new(InMemoryVoteRepository::new(posts.clone()));
        let saved: Arc<dyn SavedPostRepository> = Arc::new(InMemorySavedPostRepository::new());
        let communities: Arc<dyn CommunityRepository> = Arc::new(InMemoryCommunityRepository::new());
        let comments: Arc<dyn CommentRepository> = Arc::new(InMemoryCommentRepository::new());

        Self {
            feed: FeedService::new(posts.clone(), communities.clone()),
            voting: VotingService::new(votes),
            saved: SavedPostService::new(posts.clone(), saved),
            communities: CommunityService::new(communities),
            comments: CommentService::new(posts, comments),
            clock,
            default_sort: config.default_sort,
            feed_max_limit: config.feed_max_limit,
        }
    }
}
