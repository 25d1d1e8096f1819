//! In-memory directed graph of users, posts, and follow relationships.
//!
//! Follow edges are stored only as incoming lists: a user's `followers`
//! holds the ids of the accounts that follow them. "Who does X follow" is
//! derived by scanning every user's follower list for X's id (the
//! inverse-relation lookup used by [`SocialGraph::most_active`] and
//! [`SocialGraph::suggest_follows`]).
//!
//! Construction is append-only: users, posts, and edges are never updated
//! or deleted once recorded. Queries use soft-failure semantics; unknown
//! ids and empty graphs produce empty or `None` results, never errors.

use crate::dyn_array::DynArray;
use crate::linked_list::{ListIter, SinglyLinkedList};
use ahash::AHashMap as HashMap;
use ahash::AHashSet as HashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Opaque user identifier. Compared by equality only; no ordering is
/// assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single piece of user content: free text plus its ordered topic tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub body: String,
    pub topics: Vec<String>,
}

/// A registered account.
///
/// Posts keep per-user insertion order in a linked chain; followers are an
/// append-only id sequence with no duplicates.
#[derive(Debug)]
pub struct User {
    id: UserId,
    name: String,
    posts: SinglyLinkedList<Post>,
    followers: DynArray<UserId>,
}

impl User {
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's posts in insertion order.
    pub fn posts(&self) -> ListIter<'_, Post> {
        self.posts.iter()
    }

    /// Ids of the accounts following this user, in the order the edges were
    /// recorded.
    pub fn followers(&self) -> impl Iterator<Item = &UserId> {
        self.followers.iter()
    }

    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }
}

/// A ranked query result: who, by name, with the winning count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRank {
    pub id: UserId,
    pub name: String,
    pub count: usize,
}

/// A post search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMatch {
    pub user_id: UserId,
    pub user_name: String,
    pub body: String,
}

/// The user/edge/post model and its analytic queries.
#[derive(Debug, Default)]
pub struct SocialGraph {
    users: DynArray<User>,
}

impl SocialGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            users: DynArray::new(),
        }
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns true if no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterates over users in registration order (the graph scan order used
    /// by every query).
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Index of the user with `id` in scan order, or `None` if unknown.
    ///
    /// Linear scan; ids are opaque and unordered, so no index is kept.
    pub fn find_user_index(&self, id: &UserId) -> Option<usize> {
        self.users.iter().position(|user| &user.id == id)
    }

    /// Looks up a user by id.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.find_user_index(id)
            .and_then(|index| self.users.get(index).ok())
    }

    /// Registers a user. The first write wins: a second call with the same
    /// id is a no-op.
    pub fn add_user(&mut self, id: impl Into<UserId>, name: impl Into<String>) {
        let id = id.into();
        if self.find_user_index(&id).is_some() {
            trace!(%id, "add_user: id already present, keeping first write");
            return;
        }
        self.users.append(User {
            id,
            name: name.into(),
            posts: SinglyLinkedList::new(),
            followers: DynArray::new(),
        });
    }

    /// Records that `follower_id` follows `user_id`.
    ///
    /// Unknown `user_id` and already-recorded followers are no-ops, so a
    /// user's follower list never contains the same id twice.
    pub fn add_follower(&mut self, user_id: &UserId, follower_id: impl Into<UserId>) {
        let follower_id = follower_id.into();
        let Some(index) = self.find_user_index(user_id) else {
            trace!(%user_id, "add_follower: unknown user");
            return;
        };
        let user = self
            .users
            .get_mut(index)
            .expect("index from find_user_index is in range");
        if user.followers.iter().any(|recorded| *recorded == follower_id) {
            trace!(%user_id, %follower_id, "add_follower: duplicate edge");
            return;
        }
        user.followers.append(follower_id);
    }

    /// Appends a post to `user_id`'s content, preserving per-user insertion
    /// order. Unknown ids are a no-op.
    pub fn add_post(&mut self, user_id: &UserId, body: impl Into<String>, topics: Vec<String>) {
        let Some(index) = self.find_user_index(user_id) else {
            trace!(%user_id, "add_post: unknown user");
            return;
        };
        let user = self
            .users
            .get_mut(index)
            .expect("index from find_user_index is in range");
        user.posts.push_back(Post {
            body: body.into(),
            topics,
        });
    }

    /// The user following the most accounts (largest out-degree).
    ///
    /// Out-degree is derived by inverting the followers relation: every
    /// appearance of an id in some follower list counts as one account that
    /// id follows. The maximum is selected by scanning users in graph order
    /// with a strict-greater comparison, so ties go to the first user
    /// reached. Counts attributed to ids that are not registered users are
    /// unrankable and ignored. Empty graph yields `None`.
    pub fn most_active(&self) -> Option<UserRank> {
        let mut following: HashMap<&UserId, usize> = HashMap::default();
        for user in self.users.iter() {
            for follower in user.followers.iter() {
                *following.entry(follower).or_insert(0) += 1;
            }
        }

        let mut best: Option<UserRank> = None;
        for user in self.users.iter() {
            let count = following.get(&user.id).copied().unwrap_or(0);
            if best.as_ref().map_or(true, |current| count > current.count) {
                best = Some(UserRank {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    count,
                });
            }
        }
        best
    }

    /// The user with the most followers. Ties go to the first user reached
    /// in graph scan order (strict-greater comparison). Empty graph yields
    /// `None`.
    pub fn most_influencer(&self) -> Option<UserRank> {
        let mut best: Option<UserRank> = None;
        for user in self.users.iter() {
            let count = user.followers.len();
            if best.as_ref().map_or(true, |current| count > current.count) {
                best = Some(UserRank {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    count,
                });
            }
        }
        best
    }

    /// Ids that follow every user in `ids`.
    ///
    /// An empty input or any unknown id yields an empty result. The
    /// intersection is returned in the first listed user's follower order.
    pub fn mutual_followers(&self, ids: &[UserId]) -> Vec<UserId> {
        let Some((first, rest)) = ids.split_first() else {
            return Vec::new();
        };
        let Some(first_user) = self.user(first) else {
            return Vec::new();
        };

        let mut common: Vec<&UserId> = first_user.followers.iter().collect();
        for id in rest {
            let Some(user) = self.user(id) else {
                return Vec::new();
            };
            let followers: HashSet<&UserId> = user.followers.iter().collect();
            common.retain(|candidate| followers.contains(*candidate));
        }
        common.into_iter().cloned().collect()
    }

    /// Two-hop follow suggestions for `user_id`: the followers of every
    /// account the user follows, excluding the user and anyone already
    /// followed. Unknown ids yield an empty result.
    pub fn suggest_follows(&self, user_id: &UserId) -> Vec<UserId> {
        if self.find_user_index(user_id).is_none() {
            return Vec::new();
        }

        // The accounts whose follower lists contain `user_id` are exactly
        // the accounts `user_id` follows.
        let follows: HashSet<&UserId> = self
            .users
            .iter()
            .filter(|user| user.followers.iter().any(|f| f == user_id))
            .map(|user| &user.id)
            .collect();

        let mut suggested = Vec::new();
        let mut seen: HashSet<&UserId> = HashSet::default();
        for user in self.users.iter() {
            if !follows.contains(&user.id) {
                continue;
            }
            for candidate in user.followers.iter() {
                if candidate == user_id || follows.contains(candidate) {
                    continue;
                }
                if seen.insert(candidate) {
                    suggested.push(candidate.clone());
                }
            }
        }
        suggested
    }

    /// Posts whose body contains `word`, case-insensitively.
    ///
    /// Results follow graph scan order, then post insertion order within a
    /// user.
    pub fn search_posts_by_word(&self, word: &str) -> Vec<PostMatch> {
        let needle = word.to_lowercase();
        let mut matches = Vec::new();
        for user in self.users.iter() {
            for post in user.posts.iter() {
                if post.body.to_lowercase().contains(&needle) {
                    matches.push(PostMatch {
                        user_id: user.id.clone(),
                        user_name: user.name.clone(),
                        body: post.body.clone(),
                    });
                }
            }
        }
        matches
    }

    /// Posts tagged with `topic` (case-insensitive exact token match).
    pub fn search_posts_by_topic(&self, topic: &str) -> Vec<PostMatch> {
        let needle = topic.to_lowercase();
        let mut matches = Vec::new();
        for user in self.users.iter() {
            for post in user.posts.iter() {
                let tagged = post
                    .topics
                    .iter()
                    .any(|tag| tag.trim().to_lowercase() == needle);
                if tagged {
                    matches.push(PostMatch {
                        user_id: user.id.clone(),
                        user_name: user.name.clone(),
                        body: post.body.clone(),
                    });
                }
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> UserId {
        UserId::from(s)
    }

    #[test]
    fn test_add_user_is_idempotent() {
        let mut graph = SocialGraph::new();
        graph.add_user("u1", "First");
        graph.add_user("u1", "Second");
        assert_eq!(graph.user_count(), 1);
        assert_eq!(graph.user(&id("u1")).unwrap().name(), "First");
    }

    #[test]
    fn test_find_user_index() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        assert_eq!(graph.find_user_index(&id("a")), Some(0));
        assert_eq!(graph.find_user_index(&id("b")), Some(1));
        assert_eq!(graph.find_user_index(&id("zzz")), None);
    }

    #[test]
    fn test_add_follower_deduplicates() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_follower(&id("a"), "b");
        graph.add_follower(&id("a"), "b");
        graph.add_follower(&id("a"), "c");
        let followers: Vec<&UserId> = graph.user(&id("a")).unwrap().followers().collect();
        assert_eq!(followers, vec![&id("b"), &id("c")]);
    }

    #[test]
    fn test_add_follower_unknown_user_is_noop() {
        let mut graph = SocialGraph::new();
        graph.add_follower(&id("ghost"), "b");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_add_post_unknown_user_is_noop() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_post(&id("ghost"), "hello", vec![]);
        assert_eq!(graph.user(&id("a")).unwrap().posts().count(), 0);
    }

    #[test]
    fn test_posts_keep_insertion_order() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_post(&id("a"), "first", vec![]);
        graph.add_post(&id("a"), "second", vec![]);
        let bodies: Vec<&str> = graph
            .user(&id("a"))
            .unwrap()
            .posts()
            .map(|post| post.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[test]
    fn test_most_active_empty_graph() {
        let graph = SocialGraph::new();
        assert_eq!(graph.most_active(), None);
    }

    #[test]
    fn test_most_active_no_edges_picks_first_user() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        let rank = graph.most_active().unwrap();
        assert_eq!(rank.id, id("a"));
        assert_eq!(rank.count, 0);
    }

    #[test]
    fn test_most_active_counts_out_degree() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        graph.add_user("c", "C");
        // c follows a and b; b follows a.
        graph.add_follower(&id("a"), "c");
        graph.add_follower(&id("b"), "c");
        graph.add_follower(&id("a"), "b");
        let rank = graph.most_active().unwrap();
        assert_eq!(rank.id, id("c"));
        assert_eq!(rank.name, "C");
        assert_eq!(rank.count, 2);
    }

    #[test]
    fn test_most_active_ignores_unregistered_ids() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        // "ghost" follows both but is not a registered user.
        graph.add_follower(&id("a"), "ghost");
        graph.add_follower(&id("b"), "ghost");
        graph.add_follower(&id("a"), "b");
        let rank = graph.most_active().unwrap();
        assert_eq!(rank.id, id("b"));
        assert_eq!(rank.count, 1);
    }

    #[test]
    fn test_most_influencer_first_wins_ties() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        graph.add_follower(&id("a"), "x");
        graph.add_follower(&id("b"), "y");
        let rank = graph.most_influencer().unwrap();
        assert_eq!(rank.id, id("a"));
        assert_eq!(rank.count, 1);
    }

    #[test]
    fn test_most_influencer_empty_graph() {
        assert_eq!(SocialGraph::new().most_influencer(), None);
    }

    #[test]
    fn test_mutual_followers_empty_input() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        assert!(graph.mutual_followers(&[]).is_empty());
    }

    #[test]
    fn test_mutual_followers_unknown_id() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_follower(&id("a"), "x");
        assert!(graph.mutual_followers(&[id("a"), id("ghost")]).is_empty());
    }

    #[test]
    fn test_mutual_followers_intersection() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        graph.add_follower(&id("a"), "c");
        graph.add_follower(&id("a"), "d");
        graph.add_follower(&id("b"), "c");
        assert_eq!(graph.mutual_followers(&[id("a"), id("b")]), vec![id("c")]);
    }

    #[test]
    fn test_suggest_follows_unknown_user() {
        let graph = SocialGraph::new();
        assert!(graph.suggest_follows(&id("ghost")).is_empty());
    }

    #[test]
    fn test_suggest_follows_excludes_self_and_followed() {
        let mut graph = SocialGraph::new();
        for (uid, name) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            graph.add_user(uid, name);
        }
        // c follows a and b; d follows a.
        graph.add_follower(&id("a"), "c");
        graph.add_follower(&id("b"), "c");
        graph.add_follower(&id("a"), "d");
        // Followers of a and b, minus c itself and minus {a, b}: just d.
        assert_eq!(graph.suggest_follows(&id("c")), vec![id("d")]);
    }

    #[test]
    fn test_search_posts_by_word_case_insensitive() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_post(&id("a"), "Learning Rust today", vec![]);
        graph.add_post(&id("a"), "nothing here", vec![]);
        let matches = graph.search_posts_by_word("RUST");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].body, "Learning Rust today");
        assert_eq!(matches[0].user_id, id("a"));
    }

    #[test]
    fn test_search_posts_by_topic_exact_match() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_post(&id("a"), "post one", vec!["Rust".into(), "news".into()]);
        graph.add_post(&id("a"), "post two", vec!["rustacean".into()]);
        let matches = graph.search_posts_by_topic("rust");
        // Topic match is exact, so "rustacean" does not qualify.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].body, "post one");
    }

    #[test]
    fn test_search_results_follow_scan_order() {
        let mut graph = SocialGraph::new();
        graph.add_user("a", "A");
        graph.add_user("b", "B");
        graph.add_post(&id("b"), "shared word late", vec![]);
        graph.add_post(&id("a"), "shared word early", vec![]);
        graph.add_post(&id("a"), "shared word again", vec![]);
        let matches = graph.search_posts_by_word("shared");
        let bodies: Vec<&str> = matches.iter().map(|m| m.body.as_str()).collect();
        // User a registered first, so their posts come first.
        assert_eq!(
            bodies,
            vec!["shared word early", "shared word again", "shared word late"]
        );
    }
}
