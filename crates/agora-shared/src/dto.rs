//! Data Transfer Objects - request/response types for the API.

use agora_core::domain::VoteType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string of `GET /api/posts` and `GET /api/users/{id}/saved`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedParams {
    /// `hot`, `new`, `top` or `rising`. Anything else keeps storage order.
    pub sort: Option<String>,
    pub community: Option<Uuid>,
    pub limit: Option<usize>,
}

/// Request to submit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request to vote on a post. `vote_type` is `up` or `down`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub user_id: Uuid,
    pub vote_type: VoteType,
}

/// Request to save or unsave a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub user_id: Uuid,
}

/// A post with its derived score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
    pub comment_count: usize,
    pub created_at: String,
}

/// A ranked list of posts. `sort` is absent when storage order was kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub sort: Option<String>,
    pub posts: Vec<PostResponse>,
}

/// Outcome of a vote: `cast`, `retract` or `switch`, and the user's resulting vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub action: String,
    pub vote_type: Option<VoteType>,
    pub post: PostResponse,
}

/// Saved state of a post after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub post_id: Uuid,
    pub saved: bool,
}

/// Query string of `GET /api/communities`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityParams {
    /// Case-insensitive match against name or description.
    pub q: Option<String>,
}

/// Request to create a community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<Uuid>,
    pub created_at: String,
}

/// Request to comment on a post. Set `parent_id` to reply to another comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub author_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: String,
}
