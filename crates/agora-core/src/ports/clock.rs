use chrono::{DateTime, Utc};

/// Source of the current time. Ranking takes `now` as a value; this is where it comes from.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
