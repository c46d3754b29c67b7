//! Community handlers.

use actix_web::{HttpResponse, web};
use agora_core::domain::{Community, NewCommunity};
use agora_shared::ApiResponse;
use agora_shared::dto::{CommunityParams, CommunityResponse, CreateCommunityRequest};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn community_response(community: Community) -> CommunityResponse {
    CommunityResponse {
        id: community.id,
        name: community.name,
        description: community.description,
        creator_id: community.creator_id,
        created_at: community.created_at.to_rfc3339(),
    }
}

/// GET /api/communities?q=
pub async fn list_communities(
    state: web::Data<AppState>,
    params: web::Query<CommunityParams>,
) -> AppResult<HttpResponse> {
    let communities = state.communities.list(params.q.as_deref()).await?;
    let communities: Vec<_> = communities.into_iter().map(community_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(communities)))
}

/// POST /api/communities
pub async fn create_community(
    state: web::Data<AppState>,
    body: web::Json<CreateCommunityRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_community = NewCommunity {
        name: req.name,
        description: req.description,
        creator_id: req.creator_id,
    };

    let community = state
        .communities
        .create(new_community, state.clock.now())
        .await?;
    tracing::info!(community_id = %community.id, name = %community.name, "Community created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(community_response(community))))
}

/// GET /api/communities/{id}
pub async fn get_community(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let community = state.communities.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(community_response(community))))
}
