//! HTTP handlers and route configuration.

mod comments;
mod communities;
mod health;
mod posts;
mod saved;
mod votes;

use actix_web::web;
use agora_core::domain::Post;
use agora_core::{Rankable, SortMode};
use agora_shared::dto::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
///
/// Malformed JSON bodies, query strings and path segments are answered with an
/// RFC 7807 400 instead of actix's plain-text default.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/vote", web::post().to(votes::cast_vote))
                    .route("/{id}/save", web::post().to(saved::toggle_save))
                    .route("/{id}/comments", web::get().to(comments::list_comments))
                    .route("/{id}/comments", web::post().to(comments::add_comment)),
            )
            .service(
                web::scope("/communities")
                    .route("", web::get().to(communities::list_communities))
                    .route("", web::post().to(communities::create_community))
                    .route("/{id}", web::get().to(communities::get_community)),
            )
            .route("/users/{user_id}/saved", web::get().to(saved::list_saved)),
    );
}

/// Pick the ordering for a feed request.
///
/// A missing `sort` means the configured default. An unknown one means no
/// ranking at all: the feed keeps storage order.
fn resolve_sort(requested: Option<&str>, default: SortMode) -> Option<SortMode> {
    match requested {
        None => Some(default),
        Some(name) => match name.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!(error = %e, "Unrecognized sort mode, keeping storage order");
                None
            }
        },
    }
}

fn post_response(post: &Post, comment_count: usize) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        community_id: post.community_id,
        title: post.title.clone(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        upvotes: post.upvotes,
        downvotes: post.downvotes,
        score: post.score(),
        comment_count,
        created_at: post.created_at.to_rfc3339(),
    }
}

/// Responses for a batch of posts, in the given order, with their comment counts.
async fn post_responses(state: &AppState, posts: &[Post]) -> AppResult<Vec<PostResponse>> {
    let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
    let counts = state.comments.counts(&ids).await?;
    Ok(posts
        .iter()
        .map(|p| post_response(p, counts.get(&p.id).copied().unwrap_or(0)))
        .collect())
}

/// Response for a single post with its comment count.
async fn single_post_response(state: &AppState, post: &Post) -> AppResult<PostResponse> {
    let counts = state.comments.counts(&[post.id]).await?;
    Ok(post_response(post, counts.get(&post.id).copied().unwrap_or(0)))
}
