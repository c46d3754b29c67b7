//! Saved post handlers.

use actix_web::{HttpResponse, web};
use agora_shared::ApiResponse;
use agora_shared::dto::{FeedParams, FeedResponse, SaveRequest, SaveResponse};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{post_responses, resolve_sort};

/// POST /api/posts/{id}/save
pub async fn toggle_save(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SaveRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let user_id = body.into_inner().user_id;

    let saved = state.saved.toggle(user_id, post_id).await?;
    let message = if saved { "Post saved" } else { "Post unsaved" };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        SaveResponse { post_id, saved },
        message,
    )))
}

/// GET /api/users/{user_id}/saved?sort=
pub async fn list_saved(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<FeedParams>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let sort = resolve_sort(params.sort.as_deref(), state.default_sort);

    let posts = state
        .saved
        .saved_feed(user_id, sort, state.clock.now())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(FeedResponse {
        sort: sort.map(|m| m.to_string()),
        posts: post_responses(&state, &posts).await?,
    })))
}
