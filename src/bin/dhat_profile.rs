//! DHAT heap profiler for idcache.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use idcache::builder::{CacheBuilder, CachePolicy};
use idcache::policy::lfu::LfuCore;
use idcache::policy::lru::LruCore;
use idcache::traits::{CoreCache, EntityCache};

const CAPACITY: usize = 4096;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Entity with a heap-allocated payload, like a row loaded from storage.
#[derive(Clone)]
struct Record {
    id: u64,
    body: String,
}

impl idcache::traits::HasId<u64> for Record {
    fn id(&self) -> u64 {
        self.id
    }
}

fn record(id: u64) -> Record {
    Record {
        id,
        body: format!("record-{id:08}"),
    }
}

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// 90% of accesses go to 10% of the ids; misses load and upsert.
fn hotset_workload<C: CoreCache<u64, Record>>(cache: &mut C, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = UNIVERSE / 10;

    for _ in 0..OPERATIONS {
        let id = if rng.next_u64() % 10 < 9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + rng.next_u64() % (UNIVERSE - hot_size)
        };
        if cache.get(&id).is_none() {
            cache.upsert(record(id));
        }
    }
}

fn scan_workload<C: CoreCache<u64, Record>>(cache: &mut C) {
    for i in 0..OPERATIONS / 2 {
        let id = (i as u64) % UNIVERSE;
        if cache.get(&id).is_none() {
            cache.upsert(record(id));
        }
    }
}

fn profile_core<C: CoreCache<u64, Record>>(name: &str, mut cache: C) {
    println!("=== Profiling {name} core ===");
    for i in 0..CAPACITY as u64 {
        cache.upsert(record(i));
    }
    hotset_workload(&mut cache, 42);
    scan_workload(&mut cache);
    println!("  Final size: {}", cache.len());
}

fn profile_shared(policy: CachePolicy) {
    println!("=== Profiling shared {policy} cache ===");
    let cache = CacheBuilder::new(CAPACITY).build::<u64, Record>(policy);
    let mut hits = 0usize;
    for i in 0..OPERATIONS as u64 {
        let id = i % (CAPACITY as u64 * 2);
        match cache.get(&id) {
            Some(_) => hits += 1,
            None => cache.upsert(record(id)),
        }
    }
    println!("  Final size: {}, hits: {hits}", cache.size());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("idcache DHAT Heap Profiling");
    println!("===========================\n");

    profile_core("LRU", LruCore::new(CAPACITY));
    profile_core("LFU", LfuCore::new(CAPACITY));
    profile_shared(CachePolicy::Lru);
    profile_shared(CachePolicy::Lfu);

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
