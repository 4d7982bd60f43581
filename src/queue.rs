use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

/// Lexicographic queue priority: `primary` first, `secondary` breaks ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub primary: f64,
    pub secondary: f64,
}

impl Key {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Key { primary, secondary }
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.primary)
            .cmp(&OrderedFloat(other.primary))
            .then(OrderedFloat(self.secondary).cmp(&OrderedFloat(other.secondary)))
    }
}

/// Keyed min-queue over `(primary, secondary)` priorities.
///
/// Entries are bucketed by primary value, which makes the `min_state`
/// summary a constant-time read; a key→priority ledger gives
/// delete-by-key without scanning. Within a bucket, insertion order is
/// preserved so ties on the secondary value break deterministically.
pub struct DualPriorityQueue<K> {
    ledger: FxHashMap<K, Key>,
    buckets: BTreeMap<OrderedFloat<f64>, Vec<K>>,
}

impl<K: Eq + Hash + Clone> DualPriorityQueue<K> {
    pub fn new() -> Self {
        DualPriorityQueue {
            ledger: FxHashMap::default(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// The minimum primary value currently queued and how many entries
    /// share it; `(None, 0)` when empty.
    pub fn min_state(&self) -> (Option<f64>, usize) {
        match self.buckets.iter().next() {
            Some((primary, keys)) => (Some(primary.0), keys.len()),
            None => (None, 0),
        }
    }

    /// Inserts `key` with the given priority. A key that is already queued
    /// is updated: its old entry is removed first.
    pub fn push(&mut self, key: K, priority: Key) {
        if self.ledger.contains_key(&key) {
            self.delete_key(&key);
        }
        self.ledger.insert(key.clone(), priority);
        self.buckets
            .entry(OrderedFloat(priority.primary))
            .or_default()
            .push(key);
    }

    /// Removes `key` if present; absent keys are a no-op.
    pub fn delete_key(&mut self, key: &K) {
        let Some(priority) = self.ledger.remove(key) else {
            return;
        };
        let bucket = OrderedFloat(priority.primary);
        if let Some(keys) = self.buckets.get_mut(&bucket) {
            if let Some(at) = keys.iter().position(|k| k == key) {
                keys.remove(at);
            }
            if keys.is_empty() {
                self.buckets.remove(&bucket);
            }
        }
    }

    /// The minimum entry without removing it: minimum primary, then minimum
    /// secondary, then first-inserted.
    pub fn peek(&self) -> Option<(&K, Key)> {
        let (_, keys) = self.buckets.iter().next()?;
        let mut best: Option<(&K, Key)> = None;
        for key in keys {
            let priority = self.ledger[key];
            match best {
                Some((_, held)) if priority.secondary >= held.secondary => {}
                _ => best = Some((key, priority)),
            }
        }
        best
    }

    /// Removes and returns the minimum entry.
    pub fn pop(&mut self) -> Option<(K, Key)> {
        let (key, priority) = {
            let (key, priority) = self.peek()?;
            (key.clone(), priority)
        };
        self.delete_key(&key);
        Some((key, priority))
    }
}

impl<K: Eq + Hash + Clone> Default for DualPriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
