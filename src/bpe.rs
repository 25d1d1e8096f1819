//! Greedy pairwise-merge text codec.
//!
//! Compression treats the input as a sequence of atomic symbols, initially
//! single characters, and repeatedly replaces the most frequent adjacent
//! pair with one token whose text is the concatenation of the two. The
//! ordered list of merge tokens is the entire state needed to invert the
//! process.
//!
//! # Example
//!
//! ```
//! use socnet_rs::bpe;
//!
//! let bundle = bpe::compress("aaaa", 2);
//! assert_eq!(bundle.compressed, "aaaa");
//! assert_eq!(bundle.merge_history, vec!["aa", "aaaa"]);
//! assert_eq!(bundle.decompress(), "aaaa");
//! ```

use ahash::AHashMap as HashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Compression output: the space-joined token string plus the merge history
/// in creation order.
///
/// This bundle is the codec's sole structured interface. How it is stored or
/// shipped (a textual object notation, a flat file) is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecBundle {
    /// Final symbol sequence, rendered space-separated.
    pub compressed: String,
    /// Merge tokens in the order the merges were discovered.
    pub merge_history: Vec<String>,
}

impl CodecBundle {
    /// Reconstructs the original text by replaying the merge history.
    pub fn decompress(&self) -> String {
        decompress(&self.compressed, &self.merge_history)
    }
}

/// Compresses `text` by performing up to `max_merges` pairwise merges.
///
/// Each round counts the frequency of every adjacent symbol pair, stops
/// early if no pair exists, and otherwise replaces every non-overlapping
/// left-to-right occurrence of the most frequent pair with a single merged
/// token.
pub fn compress(text: &str, max_merges: usize) -> CodecBundle {
    let mut tokens: Vec<String> = text.chars().map(String::from).collect();
    let mut merge_history = Vec::new();

    for round in 0..max_merges {
        let Some((first, second)) = best_pair(&tokens) else {
            break;
        };
        let merged = format!("{first}{second}");
        trace!(round, token = %merged, "merging most frequent pair");

        tokens = merge_occurrences(&tokens, &first, &second, &merged);
        merge_history.push(merged);
    }

    CodecBundle {
        compressed: tokens.join(" "),
        merge_history,
    }
}

/// Reconstructs text from a compressed payload and its merge history.
///
/// Splits on spaces, replays the merges in reverse creation order, and
/// concatenates the final symbols with no separator. A history that does not
/// match the payload has no defined error path; the result is whatever the
/// token splitting produces.
pub fn decompress(compressed: &str, merge_history: &[String]) -> String {
    if compressed.is_empty() {
        return String::new();
    }
    let mut tokens: Vec<String> = compressed.split(' ').map(String::from).collect();

    // Matching is by literal token text: a token that merely coincides with
    // a merge token is split as well.
    for merge in merge_history.iter().rev() {
        let mut next = Vec::with_capacity(tokens.len());
        for token in &tokens {
            if token == merge {
                next.extend(token.chars().map(String::from));
            } else {
                next.push(token.clone());
            }
        }
        tokens = next;
    }

    tokens.concat()
}

/// Finds the most frequent adjacent pair.
///
/// Ties go to the pair whose first occurrence comes earliest in the
/// left-to-right token scan, keeping the selection deterministic for a
/// fixed input. Returns `None` when fewer than two tokens remain.
fn best_pair(tokens: &[String]) -> Option<(String, String)> {
    let mut counts: HashMap<(&str, &str), u32> = HashMap::default();
    for window in tokens.windows(2) {
        *counts
            .entry((window[0].as_str(), window[1].as_str()))
            .or_insert(0) += 1;
    }
    let max = counts.values().copied().max()?;

    tokens
        .windows(2)
        .map(|window| (window[0].as_str(), window[1].as_str()))
        .find(|pair| counts[pair] == max)
        .map(|(first, second)| (first.to_owned(), second.to_owned()))
}

/// Replaces every non-overlapping left-to-right occurrence of the pair with
/// the merged token.
fn merge_occurrences(tokens: &[String], first: &str, second: &str, merged: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if i + 1 < tokens.len() && tokens[i] == first && tokens[i + 1] == second {
            out.push(merged.to_owned());
            i += 2;
        } else {
            out.push(tokens[i].clone());
            i += 1;
        }
    }
    out
}
