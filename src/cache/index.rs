//! Secondary Index Module
//!
//! Group key to member-set mapping, maintained incrementally on put and
//! invalidate so "all members of a group" never needs a full scan.

use std::collections::HashSet;
use std::hash::Hash;

use dashmap::DashMap;

// == Secondary Index ==
/// Concurrent `group -> {members}` pointer table.
///
/// Has no TTL of its own; stale pointers resolve to nothing in the primary
/// store and are pruned on explicit removal.
#[derive(Debug)]
pub struct SecondaryIndex<G, M>
where
    G: Eq + Hash,
    M: Eq + Hash,
{
    groups: DashMap<G, HashSet<M>>,
}

impl<G, M> SecondaryIndex<G, M>
where
    G: Eq + Hash + Clone,
    M: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    // == Add ==
    /// Adds `member` to `group`, creating the group on first use.
    pub fn add(&self, group: G, member: M) {
        self.groups.entry(group).or_default().insert(member);
    }

    // == Remove ==
    /// Removes `member` from `group`. Unknown group or member is a no-op.
    ///
    /// A group left empty is dropped.
    pub fn remove(&self, group: &G, member: &M) {
        if let Some(mut members) = self.groups.get_mut(group) {
            members.remove(member);
        }
        self.groups.remove_if(group, |_, members| members.is_empty());
    }

    // == Get ==
    /// Returns a copy of the members of `group`; empty when unknown.
    pub fn get(&self, group: &G) -> HashSet<M> {
        self.groups
            .get(group)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    /// Drops every group.
    pub fn clear(&self) {
        self.groups.clear();
    }

    /// Number of tracked groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl<G, M> Default for SecondaryIndex<G, M>
where
    G: Eq + Hash + Clone,
    M: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
