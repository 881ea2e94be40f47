//! Frequency buckets for O(1) LFU bookkeeping.
//!
//! Maps an access frequency to the insertion-ordered set of ids currently at
//! that frequency. Within a bucket the oldest arrival sits at the front and is
//! the first eviction candidate (FIFO tie-break among equally frequent ids).
//! Non-empty buckets are chained in ascending frequency order, so the lowest
//! frequency is always the head of the chain.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FrequencyBuckets<K> Layout                       │
//! │                                                                         │
//! │   positions: FxHashMap<K, SlotId>     members: SlotArena<Member<K>>     │
//! │   ┌─────────┬────────┐                ┌──────┬──────────────────────┐   │
//! │   │ "a"     │ id_0   │───────────────►│ id_0 │ freq:2, prev/next    │   │
//! │   │ "b"     │ id_1   │───────────────►│ id_1 │ freq:1, prev/next    │   │
//! │   │ "c"     │ id_2   │───────────────►│ id_2 │ freq:1, prev/next    │   │
//! │   └─────────┴────────┘                └──────┴──────────────────────┘   │
//! │                                                                         │
//! │   buckets: FxHashMap<u64, Bucket>            lowest = Some(1)           │
//! │     freq=1: head ─► [id_1] ◄──► [id_2] ◄── tail                         │
//! │        │             oldest       newest                                │
//! │       next                                                              │
//! │        ▼                                                                │
//! │     freq=2: head ─► [id_0] ◄── tail                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty buckets are unlinked from the chain and dropped, so `buckets.len()`
//! is the number of distinct frequencies in use.
//!
//! | Operation          | Time   |
//! |--------------------|--------|
//! | `touch`            | O(1)   |
//! | `remove`           | O(1)   |
//! | `front`/`pop_front`| O(1)   |
//! | `lowest_frequency` | O(1)   |
//! | `push_back`        | O(1) into an existing or lowest bucket, else O(B) |
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Member<K> {
    key: K,
    freq: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    /// Next lower non-empty frequency.
    prev: Option<u64>,
    /// Next higher non-empty frequency.
    next: Option<u64>,
}

/// Frequency-indexed, insertion-ordered sets of keys.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    members: SlotArena<Member<K>>,
    positions: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    lowest: Option<u64>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates buckets with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: SlotArena::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            lowest: None,
        }
    }

    /// Number of keys across all buckets.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Frequency of the bucket holding `key`.
    pub fn frequency_of(&self, key: &K) -> Option<u64> {
        let slot = *self.positions.get(key)?;
        self.members.get(slot).map(|member| member.freq)
    }

    /// Number of keys at `freq`.
    pub fn bucket_len(&self, freq: u64) -> usize {
        self.buckets.get(&freq).map_or(0, |bucket| bucket.len)
    }

    /// Returns `true` if no key sits at `freq`.
    pub fn is_bucket_empty(&self, freq: u64) -> bool {
        self.bucket_len(freq) == 0
    }

    /// Appends `key` as the newest member of bucket `freq`.
    ///
    /// Returns `false` (and changes nothing) if `key` is already in some bucket.
    /// Creating a bucket above the lowest one walks the chain to find its place.
    pub fn push_back(&mut self, freq: u64, key: K) -> bool {
        if self.positions.contains_key(&key) {
            return false;
        }
        if !self.buckets.contains_key(&freq) {
            let (prev, next) = self.neighbours_of(freq);
            self.insert_bucket(freq, prev, next);
        }
        let slot = self.members.insert(Member {
            key: key.clone(),
            freq,
            prev: None,
            next: None,
        });
        self.append_member(freq, slot);
        self.positions.insert(key, slot);
        true
    }

    /// Moves `key` to the back of the next-higher bucket and returns its new
    /// frequency.
    ///
    /// A key already at `u64::MAX` stays there and becomes the newest member.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let slot = *self.positions.get(key)?;
        let freq = self.members.get(slot)?.freq;

        if freq == u64::MAX {
            self.detach_member(slot);
            self.append_member(freq, slot);
            return Some(freq);
        }

        let next_freq = freq + 1;
        if !self.buckets.contains_key(&next_freq) {
            let after = self.buckets.get(&freq).and_then(|bucket| bucket.next);
            self.insert_bucket(next_freq, Some(freq), after);
        }

        self.detach_member(slot);
        if let Some(member) = self.members.get_mut(slot) {
            member.freq = next_freq;
        }
        self.append_member(next_freq, slot);
        self.drop_bucket_if_empty(freq);
        Some(next_freq)
    }

    /// Removes `key` from bucket `freq`.
    ///
    /// Returns `false` if `key` is not a member of that bucket.
    pub fn remove(&mut self, freq: u64, key: &K) -> bool {
        let Some(&slot) = self.positions.get(key) else {
            return false;
        };
        if self.members.get(slot).map(|member| member.freq) != Some(freq) {
            return false;
        }
        self.detach_member(slot);
        self.drop_bucket_if_empty(freq);
        self.positions.remove(key);
        self.members.remove(slot);
        true
    }

    /// Oldest member of bucket `freq`.
    pub fn front(&self, freq: u64) -> Option<&K> {
        let slot = self.buckets.get(&freq)?.head?;
        self.members.get(slot).map(|member| &member.key)
    }

    /// Removes and returns the oldest member of bucket `freq`.
    pub fn pop_front(&mut self, freq: u64) -> Option<K> {
        let slot = self.buckets.get(&freq)?.head?;
        self.detach_member(slot);
        self.drop_bucket_if_empty(freq);
        let member = self.members.remove(slot)?;
        self.positions.remove(&member.key);
        Some(member.key)
    }

    /// Lowest frequency with at least one member.
    #[inline]
    pub fn lowest_frequency(&self) -> Option<u64> {
        self.lowest
    }

    /// Next non-empty frequency above `freq`, if `freq` has a bucket.
    pub fn next_frequency(&self, freq: u64) -> Option<u64> {
        self.buckets.get(&freq)?.next
    }

    /// Members of bucket `freq`, oldest first.
    pub fn iter_bucket(&self, freq: u64) -> impl Iterator<Item = &K> + '_ {
        let mut current = self.buckets.get(&freq).and_then(|bucket| bucket.head);
        std::iter::from_fn(move || {
            let member = self.members.get(current?)?;
            current = member.next;
            Some(&member.key)
        })
    }

    /// Non-empty frequencies in ascending order.
    pub fn frequencies(&self) -> impl Iterator<Item = u64> + '_ {
        let mut current = self.lowest;
        std::iter::from_fn(move || {
            let freq = current?;
            current = self.buckets.get(&freq).and_then(|bucket| bucket.next);
            Some(freq)
        })
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.positions.clear();
        self.buckets.clear();
        self.lowest = None;
    }

    /// Chain neighbours a new bucket at `freq` would sit between.
    fn neighbours_of(&self, freq: u64) -> (Option<u64>, Option<u64>) {
        let mut prev = None;
        let mut current = self.lowest;
        while let Some(candidate) = current {
            if candidate > freq {
                break;
            }
            prev = Some(candidate);
            current = self.buckets.get(&candidate).and_then(|bucket| bucket.next);
        }
        (prev, current)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                prev,
                next,
                ..Bucket::default()
            },
        );
        match prev {
            Some(prev) => {
                if let Some(bucket) = self.buckets.get_mut(&prev) {
                    bucket.next = Some(freq);
                }
            },
            None => self.lowest = Some(freq),
        }
        if let Some(next) = next {
            if let Some(bucket) = self.buckets.get_mut(&next) {
                bucket.prev = Some(freq);
            }
        }
    }

    fn drop_bucket_if_empty(&mut self, freq: u64) {
        let Some(bucket) = self.buckets.get(&freq).copied() else {
            return;
        };
        if bucket.len > 0 {
            return;
        }
        match bucket.prev {
            Some(prev) => {
                if let Some(prev_bucket) = self.buckets.get_mut(&prev) {
                    prev_bucket.next = bucket.next;
                }
            },
            None => self.lowest = bucket.next,
        }
        if let Some(next) = bucket.next {
            if let Some(next_bucket) = self.buckets.get_mut(&next) {
                next_bucket.prev = bucket.prev;
            }
        }
        self.buckets.remove(&freq);
    }

    fn append_member(&mut self, freq: u64, slot: SlotId) {
        let bucket = self.buckets.get_mut(&freq).expect("bucket exists before append");
        let old_tail = bucket.tail;
        bucket.tail = Some(slot);
        if old_tail.is_none() {
            bucket.head = Some(slot);
        }
        bucket.len += 1;

        if let Some(member) = self.members.get_mut(slot) {
            member.prev = old_tail;
            member.next = None;
        }
        if let Some(tail) = old_tail {
            if let Some(member) = self.members.get_mut(tail) {
                member.next = Some(slot);
            }
        }
    }

    /// Unlinks `slot` from its bucket's member list. The bucket stays, even
    /// when it becomes empty.
    fn detach_member(&mut self, slot: SlotId) {
        let Some((freq, prev, next)) = self
            .members
            .get(slot)
            .map(|member| (member.freq, member.prev, member.next))
        else {
            return;
        };

        if let Some(prev_slot) = prev {
            if let Some(member) = self.members.get_mut(prev_slot) {
                member.next = next;
            }
        }
        if let Some(next_slot) = next {
            if let Some(member) = self.members.get_mut(next_slot) {
                member.prev = prev;
            }
        }

        if let Some(bucket) = self.buckets.get_mut(&freq) {
            if prev.is_none() {
                bucket.head = next;
            }
            if next.is_none() {
                bucket.tail = prev;
            }
            bucket.len -= 1;
        }

        if let Some(member) = self.members.get_mut(slot) {
            member.prev = None;
            member.next = None;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(bucket.len > 0, "empty bucket {freq} retained");
            let mut current = bucket.head;
            let mut prev = None;
            let mut count = 0usize;
            while let Some(slot) = current {
                let member = self.members.get(slot).expect("bucket member missing");
                assert_eq!(member.freq, freq);
                assert_eq!(member.prev, prev);
                assert_eq!(self.positions.get(&member.key), Some(&slot));
                prev = Some(slot);
                current = member.next;
                count += 1;
                assert!(count <= bucket.len);
            }
            assert_eq!(bucket.tail, prev);
            assert_eq!(bucket.len, count);
            total += count;
        }
        assert_eq!(total, self.positions.len());
        assert_eq!(self.members.len(), self.positions.len());

        // The chain visits every bucket once, ascending, with matching back links.
        let mut chained = 0usize;
        let mut prev_freq: Option<u64> = None;
        let mut current = self.lowest;
        while let Some(freq) = current {
            let bucket = self.buckets.get(&freq).expect("chained bucket missing");
            assert_eq!(bucket.prev, prev_freq);
            if let Some(prev) = prev_freq {
                assert!(prev < freq, "bucket chain out of order");
            }
            prev_freq = Some(freq);
            current = bucket.next;
            chained += 1;
            assert!(chained <= self.buckets.len());
        }
        assert_eq!(chained, self.buckets.len());
        assert_eq!(self.lowest, self.buckets.keys().copied().min());
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
