use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Community, NewCommunity};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CommunityRepository};

use super::community_not_found;

/// Community creation, lookup and search.
#[derive(Clone)]
pub struct CommunityService {
    communities: Arc<dyn CommunityRepository>,
}

impl CommunityService {
    pub fn new(communities: Arc<dyn CommunityRepository>) -> Self {
        Self { communities }
    }

    /// Create a community. Names are unique regardless of case.
    pub async fn create(
        &self,
        new_community: NewCommunity,
        now: DateTime<Utc>,
    ) -> Result<Community, DomainError> {
        let community = new_community.into_community(now)?;
        if self.communities.find_by_name(&community.name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Community '{}' already exists",
                community.name
            )));
        }
        Ok(self.communities.save(community).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Community, DomainError> {
        self.communities
            .find_by_id(id)
            .await?
            .ok_or_else(|| community_not_found(id))
    }

    /// Communities newest first, narrowed to those matching `query` when one is given.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Community>, DomainError> {
        let mut communities = self.communities.list().await?;
        if let Some(query) = query {
            communities.retain(|c| c.matches(query));
        }
        Ok(communities)
    }
}
