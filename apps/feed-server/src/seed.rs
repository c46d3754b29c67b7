//! Sample content for local runs.

use agora_core::domain::{NewCommunity, NewPost, VoteType};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::state::AppState;

const DEMO_COMMUNITY: &str = "agora_demo";

/// (title, hours old, upvoters, downvoters)
const DEMO_POSTS: &[(&str, i64, usize, usize)] = &[
    ("Show us your homelab rack", 1, 10, 2),
    ("Weekly beginner questions thread", 12, 20, 15),
    ("Why does my sourdough collapse in the oven?", 3, 4, 0),
    ("Ten years of running the same mechanical keyboard", 30, 25, 3),
    ("Unpopular opinion: tabs over spaces", 2, 1, 6),
    ("Found this old photo of the city in 1920", 72, 5, 0),
];

/// Create the demo community, insert the demo posts and replay their votes.
/// Returns how many posts were created.
pub async fn seed_demo_posts(state: &AppState, now: DateTime<Utc>) -> usize {
    let author = Uuid::new_v4();
    let community = NewCommunity {
        name: DEMO_COMMUNITY.to_string(),
        description: Some("Sample posts for trying out the feed".to_string()),
        creator_id: Some(author),
    };
    let community = match state.communities.create(community, now - Duration::days(7)).await {
        Ok(community) => community,
        Err(e) => {
            tracing::warn!(error = %e, "Could not create demo community, skipping seed");
            return 0;
        }
    };
    let mut created = 0;

    for (title, hours_old, ups, downs) in DEMO_POSTS {
        let new_post = NewPost {
            author_id: author,
            community_id: community.id,
            title: title.to_string(),
            content: None,
            image_url: None,
        };

        let post = match state.feed.create_post(new_post, now - Duration::hours(*hours_old)).await {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!(error = %e, title, "Skipping demo post");
                continue;
            }
        };
        created += 1;

        let votes = std::iter::repeat_n(VoteType::Up, *ups)
            .chain(std::iter::repeat_n(VoteType::Down, *downs));
        for vote_type in votes {
            if let Err(e) = state.voting.cast_vote(post.id, Uuid::new_v4(), vote_type, now).await {
                tracing::warn!(error = %e, post_id = %post.id, "Failed to seed vote");
            }
        }
    }

    created
}
