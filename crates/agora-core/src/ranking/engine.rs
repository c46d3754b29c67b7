use chrono::{DateTime, Utc};

use super::{Rankable, SortMode};

/// Posts at least this old get a Rising trend of zero.
pub const RISING_WINDOW_HOURS: f64 = 24.0;

/// Age floor for the Rising divisor, so brand new posts do not blow up.
pub const MIN_AGE_HOURS: f64 = 1.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Fractional hours between `created_at` and `now`. Negative for posts dated in the future.
pub fn age_hours<T: Rankable + ?Sized>(post: &T, now: DateTime<Utc>) -> f64 {
    (now - post.created_at()).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Age-decayed score used by [`SortMode::Rising`].
///
/// Zero outside the 24 hour window, otherwise `score / max(age_hours, 1)`.
/// Net-negative recent posts get a negative trend and sink below old posts.
pub fn trend_score<T: Rankable + ?Sized>(post: &T, now: DateTime<Utc>) -> f64 {
    let age = age_hours(post, now);
    if age >= RISING_WINDOW_HOURS {
        return 0.0;
    }
    post.score() as f64 / age.max(MIN_AGE_HOURS)
}

/// Return a copy of `posts` ordered by `mode`.
///
/// All sorts are stable: posts the mode considers equal keep their input order.
pub fn rank<T: Rankable + Clone>(posts: &[T], mode: SortMode, now: DateTime<Utc>) -> Vec<T> {
    let mut sorted = posts.to_vec();
    if sorted.len() < 2 {
        return sorted;
    }

    match mode {
        SortMode::New => sorted.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortMode::Top => sorted.sort_by(|a, b| b.upvotes().cmp(&a.upvotes())),
        SortMode::Hot => sorted.sort_by(|a, b| {
            b.score()
                .cmp(&a.score())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        }),
        SortMode::Rising => {
            // One trend per post, all against the same `now`. Trends are finite
            // and never -0.0, so `total_cmp` agrees with numeric order.
            let mut keyed: Vec<(f64, T)> = sorted
                .into_iter()
                .map(|post| (trend_score(&post, now), post))
                .collect();
            keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
            sorted = keyed.into_iter().map(|(_, post)| post).collect();
        }
    }

    sorted
}

/// Rank by `mode` when one is selected, otherwise copy the input order.
pub fn rank_or_passthrough<T: Rankable + Clone>(
    posts: &[T],
    mode: Option<SortMode>,
    now: DateTime<Utc>,
) -> Vec<T> {
    match mode {
        Some(mode) => rank(posts, mode, now),
        None => posts.to_vec(),
    }
}

/// Rank by a mode name such as `"hot"`. Unrecognized names keep the input order.
pub fn rank_by_name<T: Rankable + Clone>(posts: &[T], name: &str, now: DateTime<Utc>) -> Vec<T> {
    rank_or_passthrough(posts, name.parse().ok(), now)
}
