//! Vote handler.

use actix_web::{HttpResponse, web};
use agora_core::Rankable;
use agora_shared::ApiResponse;
use agora_shared::dto::{VoteRequest, VoteResponse};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::single_post_response;

/// POST /api/posts/{id}/vote
///
/// Voting the same way twice withdraws the vote; voting the other way flips it.
pub async fn cast_vote(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<VoteRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let outcome = state
        .voting
        .cast_vote(post_id, req.user_id, req.vote_type, state.clock.now())
        .await?;

    tracing::info!(
        %post_id,
        user_id = %req.user_id,
        action = outcome.action.name(),
        score = outcome.post.score(),
        "Vote processed"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(VoteResponse {
        action: outcome.action.name().to_string(),
        vote_type: outcome.action.resulting_vote(),
        post: single_post_response(&state, &outcome.post).await?,
    })))
}
