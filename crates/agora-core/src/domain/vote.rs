use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

/// Vote entity - one user's vote on one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new vote with generated ID.
    pub fn new(post_id: Uuid, user_id: Uuid, vote_type: VoteType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            vote_type,
            created_at,
        }
    }
}

/// What casting a vote does to the stored vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    /// No previous vote: record the new one.
    Cast(VoteType),
    /// Same vote cast twice: withdraw it.
    Retract(VoteType),
    /// Opposite vote cast: flip the stored direction.
    Switch { from: VoteType, to: VoteType },
}

impl VoteAction {
    /// Decide the action for `requested` given the user's current vote, if any.
    pub fn resolve(existing: Option<VoteType>, requested: VoteType) -> Self {
        match existing {
            None => VoteAction::Cast(requested),
            Some(current) if current == requested => VoteAction::Retract(current),
            Some(current) => VoteAction::Switch {
                from: current,
                to: requested,
            },
        }
    }

    /// Short lowercase label, as reported to API clients.
    pub fn name(self) -> &'static str {
        match self {
            VoteAction::Cast(_) => "cast",
            VoteAction::Retract(_) => "retract",
            VoteAction::Switch { .. } => "switch",
        }
    }

    /// Change in the post's up/down counters caused by this action.
    pub fn tally_delta(self) -> TallyDelta {
        match self {
            VoteAction::Cast(t) => TallyDelta::of(t, 1),
            VoteAction::Retract(t) => TallyDelta::of(t, -1),
            VoteAction::Switch { from, to } => TallyDelta::of(from, -1) + TallyDelta::of(to, 1),
        }
    }

    /// The vote the user holds after this action.
    pub fn resulting_vote(self) -> Option<VoteType> {
        match self {
            VoteAction::Cast(t) => Some(t),
            VoteAction::Retract(_) => None,
            VoteAction::Switch { to, .. } => Some(to),
        }
    }
}

/// Signed change to a post's upvote and downvote counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyDelta {
    pub up: i32,
    pub down: i32,
}

impl TallyDelta {
    fn of(vote_type: VoteType, amount: i32) -> Self {
        match vote_type {
            VoteType::Up => Self { up: amount, down: 0 },
            VoteType::Down => Self { up: 0, down: amount },
        }
    }
}

impl std::ops::Add for TallyDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            up: self.up + rhs.up,
            down: self.down + rhs.down,
        }
    }
}
