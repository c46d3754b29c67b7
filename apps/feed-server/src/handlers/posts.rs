//! Feed and post handlers.

use actix_web::{HttpResponse, web};
use agora_core::domain::NewPost;
use agora_core::services::FeedQuery;
use agora_shared::ApiResponse;
use agora_shared::dto::{CreatePostRequest, FeedParams, FeedResponse};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{post_responses, resolve_sort, single_post_response};

/// GET /api/posts?sort=&community=&limit=
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<FeedParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let sort = resolve_sort(params.sort.as_deref(), state.default_sort);
    let limit = params
        .limit
        .unwrap_or(state.feed_max_limit)
        .min(state.feed_max_limit);

    let query = FeedQuery {
        community_id: params.community,
        sort,
        limit: Some(limit),
    };
    let posts = state.feed.feed(&query, state.clock.now()).await?;

    tracing::debug!(
        sort = sort.map(|m| m.as_str()).unwrap_or("none"),
        count = posts.len(),
        "Served feed"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(FeedResponse {
        sort: sort.map(|m| m.to_string()),
        posts: post_responses(&state, &posts).await?,
    })))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost {
        author_id: req.author_id,
        community_id: req.community_id,
        title: req.title,
        content: req.content,
        image_url: req.image_url,
    };

    let post = state.feed.create_post(new_post, state.clock.now()).await?;
    tracing::info!(post_id = %post.id, community_id = %post.community_id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(single_post_response(&state, &post).await?)))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.feed.post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(single_post_response(&state, &post).await?)))
}
