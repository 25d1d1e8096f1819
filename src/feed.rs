//! Construction feed: the ordered record stream a graph is replayed from.
//!
//! The core is agnostic to where records come from (a markup document, a
//! flat file, or direct calls); it only requires that per-user post order
//! is preserved by record order.

use crate::graph::{SocialGraph, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One graph construction operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedRecord {
    /// Declare a user. Redeclaring an id keeps the first declaration.
    User { id: UserId, name: String },
    /// Append a post to a known user's content.
    Post {
        user_id: UserId,
        body: String,
        topics: Vec<String>,
    },
    /// Record a follow edge: `follower_id` follows `user_id`.
    Follower {
        user_id: UserId,
        follower_id: UserId,
    },
}

impl SocialGraph {
    /// Applies construction records in order.
    ///
    /// Each record maps to one mutation call, so all the no-op rules
    /// (duplicate users, duplicate edges, unknown ids) apply unchanged.
    pub fn replay<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = FeedRecord>,
    {
        let mut applied = 0usize;
        for record in records {
            match record {
                FeedRecord::User { id, name } => self.add_user(id, name),
                FeedRecord::Post {
                    user_id,
                    body,
                    topics,
                } => self.add_post(&user_id, body, topics),
                FeedRecord::Follower {
                    user_id,
                    follower_id,
                } => self.add_follower(&user_id, follower_id),
            }
            applied += 1;
        }
        debug!(records = applied, users = self.user_count(), "replayed construction feed");
    }

    /// Builds a graph by replaying `records` into an empty graph.
    pub fn from_feed<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FeedRecord>,
    {
        let mut graph = Self::new();
        graph.replay(records);
        graph
    }
}
