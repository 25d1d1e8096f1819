use socnet_rs::{bpe, FeedRecord, SocialGraph, UserId};
use tracing_subscriber::EnvFilter;

/// Demo mirroring the typical collaborator flow: replay a construction
/// feed, run the analytic queries, then round-trip a payload through the
/// codec.
///
/// Usage: cargo run --example demo
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = vec![
        FeedRecord::User {
            id: UserId::from("a"),
            name: "Amira".into(),
        },
        FeedRecord::User {
            id: UserId::from("b"),
            name: "Basil".into(),
        },
        FeedRecord::User {
            id: UserId::from("c"),
            name: "Chidi".into(),
        },
        FeedRecord::Post {
            user_id: UserId::from("a"),
            body: "Shipped the compression pass".into(),
            topics: vec!["engineering".into()],
        },
        FeedRecord::Follower {
            user_id: UserId::from("a"),
            follower_id: UserId::from("c"),
        },
        FeedRecord::Follower {
            user_id: UserId::from("a"),
            follower_id: UserId::from("b"),
        },
        FeedRecord::Follower {
            user_id: UserId::from("b"),
            follower_id: UserId::from("c"),
        },
    ];

    let graph = SocialGraph::from_feed(records);

    println!("=== Graph ===");
    println!("Users: {}", graph.user_count());
    if let Some(rank) = graph.most_influencer() {
        println!("Most influencer: {} ({}) with {} followers", rank.id, rank.name, rank.count);
    }
    if let Some(rank) = graph.most_active() {
        println!("Most active: {} ({}) following {} accounts", rank.id, rank.name, rank.count);
    }
    let mutuals = graph.mutual_followers(&[UserId::from("a"), UserId::from("b")]);
    println!("Mutual followers of a and b: {mutuals:?}");
    for hit in graph.search_posts_by_word("compression") {
        println!("Post by {} ({}): {}", hit.user_id, hit.user_name, hit.body);
    }

    let text = "abcabcabcabcabcabc";
    let bundle = bpe::compress(text, 8);

    println!("\n=== Codec ===");
    println!("Input:      {text}");
    println!("Compressed: {}", bundle.compressed);
    println!("Merges:     {:?}", bundle.merge_history);

    let restored = bundle.decompress();
    assert_eq!(restored, text);
    println!("Round-trip OK ({} chars)", restored.len());
}
