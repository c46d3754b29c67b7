//! Domain entities - the core business objects.

mod comment;
mod community;
mod post;
mod vote;

pub use comment::{Comment, MAX_COMMENT_LEN, NewComment};
pub use community::{COMMUNITY_NAME_LEN, Community, NewCommunity};
pub use post::{MAX_TITLE_LEN, NewPost, Post};
pub use vote::{TallyDelta, Vote, VoteAction, VoteType};
