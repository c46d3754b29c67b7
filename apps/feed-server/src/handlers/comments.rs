//! Comment handlers.

use actix_web::{HttpResponse, web};
use agora_core::domain::{Comment, NewComment};
use agora_shared::ApiResponse;
use agora_shared::dto::{CommentResponse, CreateCommentRequest};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        parent_id: comment.parent_id,
        content: comment.content,
        upvotes: comment.upvotes,
        downvotes: comment.downvotes,
        created_at: comment.created_at.to_rfc3339(),
    }
}

/// GET /api/posts/{id}/comments
///
/// Oldest first. Replies carry their `parent_id`; clients build the tree.
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.comments.list(path.into_inner()).await?;
    let comments: Vec<_> = comments.into_iter().map(comment_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    let new_comment = NewComment {
        author_id: req.author_id,
        parent_id: req.parent_id,
        content: req.content,
    };

    let comment = state
        .comments
        .add(post_id, new_comment, state.clock.now())
        .await?;
    tracing::info!(%post_id, comment_id = %comment.id, "Comment added");

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_response(comment))))
}
