use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordering strategy selected by the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Net score, newest first among equal scores.
    #[default]
    Hot,
    /// Creation time, newest first.
    New,
    /// Raw upvote count.
    Top,
    /// Net score per hour of age, for posts younger than a day.
    Rising,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [SortMode::Hot, SortMode::New, SortMode::Top, SortMode::Rising];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Top => "top",
            SortMode::Rising => "rising",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort name that is not one of `hot`, `new`, `top` or `rising`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}
