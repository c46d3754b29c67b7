//! Post ranking - the Hot, New, Top and Rising orderings of a feed.
//!
//! Ranking is a pure function of a post snapshot, a [`SortMode`] and the
//! current time. Nothing here reads a clock; callers pass `now` explicitly.

mod engine;
mod mode;

use chrono::{DateTime, Utc};

use crate::domain::Post;

pub use engine::{
    MIN_AGE_HOURS, RISING_WINDOW_HOURS, age_hours, rank, rank_by_name, rank_or_passthrough,
    trend_score,
};
pub use mode::{SortMode, UnknownSortMode};

/// Anything with vote counts and a creation time can be ranked.
pub trait Rankable {
    fn upvotes(&self) -> u32;

    fn downvotes(&self) -> u32;

    fn created_at(&self) -> DateTime<Utc>;

    /// Upvotes minus downvotes.
    fn score(&self) -> i64 {
        i64::from(self.upvotes()) - i64::from(self.downvotes())
    }
}

impl Rankable for Post {
    fn upvotes(&self) -> u32 {
        self.upvotes
    }

    fn downvotes(&self) -> u32 {
        self.downvotes
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
