use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Allowed community name length, in characters.
pub const COMMUNITY_NAME_LEN: RangeInclusive<usize> = 3..=21;

/// Community entity - a named board that posts belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: Uuid,
    /// Lowercase, unique.
    pub name: String,
    pub description: Option<String>,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a community.
#[derive(Debug, Clone)]
pub struct NewCommunity {
    pub name: String,
    pub description: Option<String>,
    pub creator_id: Option<Uuid>,
}

impl NewCommunity {
    /// Check the name and build the community. Names are stored lowercase.
    pub fn into_community(self, created_at: DateTime<Utc>) -> Result<Community, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Community name must not be empty".to_string()));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::Validation(
                "Community name may only contain letters, digits and underscores".to_string(),
            ));
        }
        if !COMMUNITY_NAME_LEN.contains(&name.len()) {
            return Err(DomainError::Validation(format!(
                "Community name must be {} to {} characters",
                COMMUNITY_NAME_LEN.start(),
                COMMUNITY_NAME_LEN.end()
            )));
        }

        Ok(Community {
            id: Uuid::new_v4(),
            name: name.to_ascii_lowercase(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            creator_id: self.creator_id,
            created_at,
        })
    }
}

impl Community {
    /// Case-insensitive substring match on name or description. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}
