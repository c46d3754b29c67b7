use std::sync::Arc;

use agora_core::DomainError;
use agora_core::Rankable;
use agora_core::domain::{NewComment, NewCommunity, NewPost, Post, TallyDelta, VoteAction, VoteType};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, Clock, CommunityRepository, PostRepository};
use agora_core::ranking::SortMode;
use agora_core::services::{
    CommentService, CommunityService, FeedQuery, FeedService, SavedPostService, VotingService,
};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    FixedClock, InMemoryCommentRepository, InMemoryCommunityRepository, InMemoryPostRepository,
    InMemorySavedPostRepository, InMemoryVoteRepository,
};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
}

fn post(community_id: Uuid, title: &str, up: u32, down: u32, hours_ago: i64) -> Post {
    let mut post = NewPost {
        author_id: Uuid::new_v4(),
        community_id,
        title: title.to_string(),
        content: None,
        image_url: None,
    }
    .into_post(clock().now() - Duration::hours(hours_ago))
    .unwrap();
    post.upvotes = up;
    post.downvotes = down;
    post
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

async fn community(repo: &InMemoryCommunityRepository, name: &str) -> Uuid {
    let community = NewCommunity {
        name: name.to_string(),
        description: None,
        creator_id: None,
    }
    .into_community(clock().now())
    .unwrap();
    repo.save(community).await.unwrap().id
}

fn feed_over(posts: Arc<InMemoryPostRepository>) -> FeedService {
    FeedService::new(posts, Arc::new(InMemoryCommunityRepository::new()))
}

fn voting_over(posts: Arc<InMemoryPostRepository>) -> VotingService {
    VotingService::new(Arc::new(InMemoryVoteRepository::new(posts)))
}

#[tokio::test]
async fn test_feed_ranks_snapshot() {
    let community = Uuid::new_v4();
    let repo = Arc::new(InMemoryPostRepository::with_posts([
        post(community, "A", 10, 2, 1),
        post(community, "B", 20, 15, 12),
        post(community, "C", 5, 0, 72),
    ]));
    let feed = feed_over(repo);
    let now = clock().now();

    let mut query = FeedQuery {
        sort: Some(SortMode::Top),
        ..FeedQuery::default()
    };
    assert_eq!(titles(&feed.feed(&query, now).await.unwrap()), ["B", "A", "C"]);

    query.sort = Some(SortMode::Rising);
    assert_eq!(titles(&feed.feed(&query, now).await.unwrap()), ["A", "B", "C"]);

    // No mode: repository order, newest first.
    query.sort = None;
    assert_eq!(titles(&feed.feed(&query, now).await.unwrap()), ["A", "B", "C"]);
}

#[tokio::test]
async fn test_feed_filters_community_and_limits_after_ranking() {
    let communities = Arc::new(InMemoryCommunityRepository::new());
    let cooking = community(&communities, "cooking").await;
    let rust = community(&communities, "rust").await;
    let repo = Arc::new(InMemoryPostRepository::with_posts([
        post(cooking, "pasta", 50, 0, 30),
        post(rust, "borrowck", 3, 0, 1),
        post(rust, "lifetimes", 9, 0, 40),
        post(rust, "traits", 1, 0, 2),
    ]));
    let feed = FeedService::new(repo, communities);

    let query = FeedQuery {
        community_id: Some(rust),
        sort: Some(SortMode::Hot),
        limit: Some(2),
    };
    let posts = feed.feed(&query, clock().now()).await.unwrap();
    assert_eq!(titles(&posts), ["lifetimes", "borrowck"]);
}

#[tokio::test]
async fn test_feed_for_unknown_community_is_not_found() {
    let feed = feed_over(Arc::new(InMemoryPostRepository::new()));
    let query = FeedQuery {
        community_id: Some(Uuid::new_v4()),
        ..FeedQuery::default()
    };
    let err = feed.feed(&query, clock().now()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Community", .. }));
}

#[tokio::test]
async fn test_create_post_starts_unvoted() {
    let communities = Arc::new(InMemoryCommunityRepository::new());
    let community_id = community(&communities, "general").await;
    let feed = FeedService::new(Arc::new(InMemoryPostRepository::new()), communities);
    let created = feed
        .create_post(
            NewPost {
                author_id: Uuid::new_v4(),
                community_id,
                title: "First!".to_string(),
                content: Some("hello".to_string()),
                image_url: None,
            },
            clock().now(),
        )
        .await
        .unwrap();

    let fetched = feed.post(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.score(), 0);
}

#[tokio::test]
async fn test_create_post_in_unknown_community_fails() {
    let posts = Arc::new(InMemoryPostRepository::new());
    let feed = feed_over(posts.clone());
    let err = feed
        .create_post(
            NewPost {
                author_id: Uuid::new_v4(),
                community_id: Uuid::new_v4(),
                title: "Lost".to_string(),
                content: None,
                image_url: None,
            },
            clock().now(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { entity_type: "Community", .. }));
    assert!(posts.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_post_is_not_found() {
    let feed = feed_over(Arc::new(InMemoryPostRepository::new()));
    let err = feed.post(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn test_votes_move_tallies() {
    let target = post(Uuid::new_v4(), "votable", 0, 0, 1);
    let posts = Arc::new(InMemoryPostRepository::with_posts([target.clone()]));
    let voting = voting_over(posts.clone());
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
    let now = clock().now();

    let outcome = voting.cast_vote(target.id, alice, VoteType::Up, now).await.unwrap();
    assert_eq!(outcome.action, VoteAction::Cast(VoteType::Up));
    assert_eq!((outcome.post.upvotes, outcome.post.downvotes), (1, 0));

    voting.cast_vote(target.id, bob, VoteType::Up, now).await.unwrap();
    let outcome = voting.cast_vote(target.id, alice, VoteType::Down, now).await.unwrap();
    assert_eq!((outcome.post.upvotes, outcome.post.downvotes), (1, 1));

    let outcome = voting.cast_vote(target.id, alice, VoteType::Down, now).await.unwrap();
    assert_eq!(outcome.action, VoteAction::Retract(VoteType::Down));
    assert_eq!((outcome.post.upvotes, outcome.post.downvotes), (1, 0));
    assert_eq!(voting.current_vote(target.id, alice).await.unwrap(), None);
    assert_eq!(voting.current_vote(target.id, bob).await.unwrap(), Some(VoteType::Up));

    let stored = posts.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!(stored.score(), 1);
}

#[tokio::test]
async fn test_vote_on_missing_post_leaves_no_record() {
    let voting = voting_over(Arc::new(InMemoryPostRepository::new()));
    let (post_id, user) = (Uuid::new_v4(), Uuid::new_v4());

    let err = voting
        .cast_vote(post_id, user, VoteType::Up, clock().now())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(voting.current_vote(post_id, user).await.unwrap(), None);
}

/// Post store that yields to the scheduler in the middle of every tally update,
/// widening the window between reading a vote and writing it back.
struct YieldingPosts(InMemoryPostRepository);

#[async_trait]
impl BaseRepository<Post, Uuid> for YieldingPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.0.save(post).await
    }
}

#[async_trait]
impl PostRepository for YieldingPosts {
    async fn list(&self, community_id: Option<Uuid>) -> Result<Vec<Post>, RepoError> {
        self.0.list(community_id).await
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        self.0.find_many(ids).await
    }

    async fn apply_tally(&self, id: Uuid, delta: TallyDelta) -> Result<Post, RepoError> {
        tokio::task::yield_now().await;
        self.0.apply_tally(id, delta).await
    }
}

#[tokio::test]
async fn test_concurrent_same_user_votes_serialize() {
    let target = post(Uuid::new_v4(), "contested", 0, 0, 1);
    let posts = Arc::new(YieldingPosts(InMemoryPostRepository::with_posts([target.clone()])));
    let voting = VotingService::new(Arc::new(InMemoryVoteRepository::new(posts.clone())));
    let user = Uuid::new_v4();
    let now = clock().now();

    let (first, second) = tokio::join!(
        voting.cast_vote(target.id, user, VoteType::Up, now),
        voting.cast_vote(target.id, user, VoteType::Up, now),
    );
    let mut actions = [first.unwrap().action, second.unwrap().action];
    actions.sort_by_key(|a| a.name());
    assert_eq!(
        actions,
        [VoteAction::Cast(VoteType::Up), VoteAction::Retract(VoteType::Up)]
    );

    let stored = posts.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!((stored.upvotes, stored.downvotes), (0, 0));
    assert_eq!(voting.current_vote(target.id, user).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_votes_keep_tally_consistent() {
    let target = post(Uuid::new_v4(), "busy", 0, 0, 1);
    let posts = Arc::new(YieldingPosts(InMemoryPostRepository::with_posts([target.clone()])));
    let voting = Arc::new(VotingService::new(Arc::new(InMemoryVoteRepository::new(
        posts.clone(),
    ))));
    let now = clock().now();

    // Ten users each vote up three times: cast, retract, cast.
    let mut handles = Vec::new();
    for _ in 0..10 {
        let user = Uuid::new_v4();
        for _ in 0..3 {
            let voting = voting.clone();
            handles.push(tokio::spawn(async move {
                voting.cast_vote(target.id, user, VoteType::Up, now).await
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = posts.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!((stored.upvotes, stored.downvotes), (10, 0));
}

#[tokio::test]
async fn test_votes_change_hot_order() {
    let community = Uuid::new_v4();
    let older = post(community, "older", 0, 0, 5);
    let newer = post(community, "newer", 0, 0, 1);
    let posts = Arc::new(InMemoryPostRepository::with_posts([older.clone(), newer]));
    let feed = feed_over(posts.clone());
    let voting = voting_over(posts);
    let query = FeedQuery {
        sort: Some(SortMode::Hot),
        ..FeedQuery::default()
    };
    let clock = clock();

    assert_eq!(titles(&feed.feed(&query, clock.now()).await.unwrap()), ["newer", "older"]);

    voting
        .cast_vote(older.id, Uuid::new_v4(), VoteType::Up, clock.now())
        .await
        .unwrap();
    clock.advance(Duration::minutes(10));
    assert_eq!(titles(&feed.feed(&query, clock.now()).await.unwrap()), ["older", "newer"]);
}

#[tokio::test]
async fn test_saved_feed_is_ranked() {
    let community = Uuid::new_v4();
    let keep = post(community, "keep", 2, 0, 3);
    let best = post(community, "best", 9, 0, 10);
    let other = post(community, "other", 100, 0, 1);
    let posts = Arc::new(InMemoryPostRepository::with_posts([
        keep.clone(),
        best.clone(),
        other,
    ]));
    let saved = SavedPostService::new(posts, Arc::new(InMemorySavedPostRepository::new()));
    let user = Uuid::new_v4();
    let now = clock().now();

    assert!(saved.toggle(user, keep.id).await.unwrap());
    assert!(saved.toggle(user, best.id).await.unwrap());
    assert!(saved.is_saved(user, best.id).await.unwrap());

    let ranked = saved.saved_feed(user, Some(SortMode::Top), now).await.unwrap();
    assert_eq!(titles(&ranked), ["best", "keep"]);

    assert!(!saved.toggle(user, best.id).await.unwrap());
    let ranked = saved.saved_feed(user, None, now).await.unwrap();
    assert_eq!(titles(&ranked), ["keep"]);
}

#[tokio::test]
async fn test_save_missing_post_fails() {
    let saved = SavedPostService::new(
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemorySavedPostRepository::new()),
    );
    assert!(saved.toggle(Uuid::new_v4(), Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn test_community_names_are_unique_case_insensitively() {
    let repo = Arc::new(InMemoryCommunityRepository::new());
    let service = CommunityService::new(repo.clone());
    let now = clock().now();
    let new = |name: &str| NewCommunity {
        name: name.to_string(),
        description: Some("All about the language".to_string()),
        creator_id: None,
    };

    let created = service.create(new("Rust"), now).await.unwrap();
    assert_eq!(created.name, "rust");
    assert_eq!(service.get(created.id).await.unwrap(), created);

    let err = service.create(new("RUST"), now).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_community_search() {
    let service = CommunityService::new(Arc::new(InMemoryCommunityRepository::new()));
    let now = clock().now();
    for (name, description) in [("cooking", "Recipes and kitchens"), ("rustlang", "Systems")] {
        service
            .create(
                NewCommunity {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    creator_id: None,
                },
                now,
            )
            .await
            .unwrap();
    }

    let names = |found: Vec<agora_core::domain::Community>| {
        let mut names: Vec<String> = found.into_iter().map(|c| c.name).collect();
        names.sort();
        names
    };
    assert_eq!(names(service.list(Some("KITCHEN")).await.unwrap()), ["cooking"]);
    assert_eq!(names(service.list(Some("rust")).await.unwrap()), ["rustlang"]);
    assert_eq!(names(service.list(None).await.unwrap()), ["cooking", "rustlang"]);
    assert!(matches!(
        service.get(Uuid::new_v4()).await.unwrap_err(),
        DomainError::NotFound { entity_type: "Community", .. }
    ));
}

#[tokio::test]
async fn test_comments_thread_and_count() {
    let target = post(Uuid::new_v4(), "discuss", 0, 0, 1);
    let quiet = post(Uuid::new_v4(), "quiet", 0, 0, 1);
    let posts = Arc::new(InMemoryPostRepository::with_posts([target.clone(), quiet.clone()]));
    let comments = CommentService::new(posts, Arc::new(InMemoryCommentRepository::new()));
    let clock = clock();
    let new = |content: &str, parent_id: Option<Uuid>| NewComment {
        author_id: Uuid::new_v4(),
        parent_id,
        content: content.to_string(),
    };

    let root = comments.add(target.id, new("first", None), clock.now()).await.unwrap();
    clock.advance(Duration::minutes(1));
    let reply = comments
        .add(target.id, new("reply", Some(root.id)), clock.now())
        .await
        .unwrap();
    assert_eq!(reply.parent_id, Some(root.id));

    let listed = comments.list(target.id).await.unwrap();
    assert_eq!(listed, [root.clone(), reply]);

    let counts = comments.counts(&[target.id, quiet.id]).await.unwrap();
    assert_eq!(counts[&target.id], 2);
    assert_eq!(counts[&quiet.id], 0);

    // A parent from another post is rejected.
    let err = comments
        .add(quiet.id, new("misplaced", Some(root.id)), clock.now())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = comments
        .add(Uuid::new_v4(), new("orphan", None), clock.now())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}
