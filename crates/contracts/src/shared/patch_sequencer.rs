//! Per-key monotonic tickets for debounced incremental saves.
//!
//! Each edit stamps a new ticket for its key. When a debounce timer fires,
//! or a response comes back, the holder checks whether its ticket is still
//! the latest one; stale tickets are dropped. The ticket number also travels
//! in the request body so the server can discard out-of-order arrivals.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket<K> {
    pub key: K,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub struct PatchSequencer<K> {
    latest: HashMap<K, u64>,
}

impl<K: Eq + Hash + Copy> Default for PatchSequencer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy> PatchSequencer<K> {
    pub fn new() -> Self {
        Self {
            latest: HashMap::new(),
        }
    }

    /// Start seq numbers above those the server already saw for this key.
    pub fn seed(&mut self, key: K, seq: u64) {
        let entry = self.latest.entry(key).or_insert(0);
        if seq > *entry {
            *entry = seq;
        }
    }

    pub fn stamp(&mut self, key: K) -> Ticket<K> {
        let entry = self.latest.entry(key).or_insert(0);
        *entry += 1;
        Ticket { key, seq: *entry }
    }

    pub fn is_latest(&self, ticket: &Ticket<K>) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.seq)
    }
}
