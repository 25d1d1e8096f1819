//! # socnet-rs - Social Graph Analytics and Pair-Merge Compression
//!
//! An in-memory directed-graph model of users, posts, and follow
//! relationships with analytic queries: influence ranking, mutual-follower
//! sets, two-hop follow suggestions, and content search. Alongside it, a
//! greedy byte-pair codec compresses raw text into a token string plus the
//! merge history needed to invert it.
//!
//! Both sit on a small set of from-scratch containers: a doubling growable
//! array ([`DynArray`]), an arena-backed singly linked list
//! ([`SinglyLinkedList`]), and a LIFO stack ([`Stack`]).
//!
//! ## Example
//!
//! ```
//! use socnet_rs::{SocialGraph, UserId};
//!
//! let mut graph = SocialGraph::new();
//! graph.add_user("a", "Amira");
//! graph.add_user("b", "Basil");
//! graph.add_follower(&UserId::from("a"), "b");
//!
//! let top = graph.most_influencer().unwrap();
//! assert_eq!(top.id, UserId::from("a"));
//! assert_eq!(top.count, 1);
//! ```
//!
//! Compression round-trip:
//!
//! ```
//! use socnet_rs::bpe;
//!
//! let bundle = bpe::compress("abcabcabc", 4);
//! assert_eq!(bpe::decompress(&bundle.compressed, &bundle.merge_history), "abcabcabc");
//! ```
//!
//! ## Scope
//!
//! Everything is single-threaded, synchronous, and in-memory. Callers that
//! share a graph or container across threads must serialize all access.
//! Parsing, presentation, and file I/O are external collaborators' concerns;
//! the graph is built by replaying [`FeedRecord`]s and the codec speaks only
//! [`CodecBundle`].

mod dyn_array;
mod error;
mod feed;
mod graph;
mod linked_list;
mod stack;

pub mod bpe;

#[cfg(test)]
mod tests;

pub use bpe::CodecBundle;
pub use dyn_array::DynArray;
pub use error::{ContainerError, Result};
pub use feed::FeedRecord;
pub use graph::{Post, PostMatch, SocialGraph, User, UserId, UserRank};
pub use linked_list::{ListIter, SinglyLinkedList};
pub use stack::Stack;
