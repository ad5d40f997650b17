//! # Like Ledger
//!
//! The one place like-sets live. Photos and their feed items share a
//! `FeedItemId::Photo` key, so both views read the same set.

use std::collections::HashMap;

use crate::models::FeedItemId;

/// Ordered set of identities that liked one item.
#[derive(Debug, Default, Clone)]
pub struct LikeSet {
    likers: Vec<String>,
}

impl LikeSet {
    /// Returns `false` when the identity is already present.
    pub fn insert(&mut self, identity: &str) -> bool {
        if self.contains(identity) {
            return false;
        }
        self.likers.push(identity.to_string());
        true
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.likers.iter().any(|l| l == identity)
    }

    pub fn count(&self) -> usize {
        self.likers.len()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.likers.clone()
    }
}

#[derive(Debug, Default)]
pub struct LikeLedger {
    sets: HashMap<FeedItemId, LikeSet>,
}

impl LikeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a like. The caller is responsible for checking that `item`
    /// exists; the ledger only enforces once-per-identity.
    pub fn like(&mut self, item: FeedItemId, identity: &str) -> bool {
        self.sets.entry(item).or_default().insert(identity)
    }

    pub fn count(&self, item: &FeedItemId) -> usize {
        self.sets.get(item).map_or(0, LikeSet::count)
    }

    pub fn likers(&self, item: &FeedItemId) -> Vec<String> {
        self.sets.get(item).map(LikeSet::to_vec).unwrap_or_default()
    }
}
