// ==============================================
// CACHE CONTRACT TESTS (integration)
// ==============================================
//
// Behaviour every policy must share through `EntityCache`, plus the
// scenarios that tell LRU and LFU apart.

use idcache::builder::{Cache, CacheBuilder, CachePolicy};
use idcache::traits::{EntityCache, HasId};

#[derive(Debug, Clone, PartialEq)]
struct News {
    id: u64,
    title: String,
}

impl HasId<u64> for News {
    fn id(&self) -> u64 {
        self.id
    }
}

fn news(id: u64) -> News {
    News {
        id,
        title: format!("headline {id}"),
    }
}

fn build(policy: CachePolicy, capacity: usize) -> Cache<u64, News> {
    CacheBuilder::new(capacity).build(policy)
}

const POLICIES: [CachePolicy; 2] = [CachePolicy::Lru, CachePolicy::Lfu];

mod shared_contract {
    use super::*;

    #[test]
    fn size_never_exceeds_capacity() {
        for policy in POLICIES {
            for capacity in [0, 1, 3, 8] {
                let cache = build(policy, capacity);
                for id in 0..40 {
                    cache.upsert(news(id % 13));
                    if id % 3 == 0 {
                        cache.get(&(id % 5));
                    }
                    if id % 7 == 0 {
                        cache.remove(&(id % 11));
                    }
                    assert!(cache.size() <= capacity, "{policy} cap {capacity}");
                }
            }
        }
    }

    #[test]
    fn zero_capacity_caches_nothing() {
        for policy in POLICIES {
            let cache = build(policy, 0);
            for id in 0..5 {
                cache.upsert(news(id));
                assert_eq!(cache.size(), 0);
                assert_eq!(cache.get(&id), None);
            }
        }
    }

    #[test]
    fn repeated_upsert_keeps_size() {
        for policy in POLICIES {
            let cache = build(policy, 4);
            cache.upsert(news(1));
            cache.upsert(news(1));
            assert_eq!(cache.size(), 1);
            assert_eq!(cache.get(&1), Some(news(1)));
        }
    }

    #[test]
    fn upsert_replaces_resident_value() {
        for policy in POLICIES {
            let cache = build(policy, 4);
            cache.upsert(news(1));
            let edited = News {
                id: 1,
                title: "corrected".to_string(),
            };
            cache.upsert(edited.clone());
            assert_eq!(cache.get(&1), Some(edited));
        }
    }

    #[test]
    fn clear_then_refill_does_not_evict() {
        for policy in POLICIES {
            let cache = build(policy, 3);
            for id in 0..3 {
                cache.upsert(news(id));
            }
            cache.clear();
            assert_eq!(cache.size(), 0);

            for id in 10..13 {
                cache.upsert(news(id));
            }
            assert_eq!(cache.size(), 3);
            for id in 10..13 {
                assert!(cache.contains(&id), "{policy} lost {id}");
            }
        }
    }

    #[test]
    fn remove_absent_is_noop() {
        for policy in POLICIES {
            let cache = build(policy, 2);
            cache.upsert(news(1));
            cache.remove(&2);
            assert_eq!(cache.size(), 1);
        }
    }

    #[test]
    fn removed_entity_misses_and_frees_a_slot() {
        for policy in POLICIES {
            let cache = build(policy, 2);
            cache.upsert(news(1));
            cache.upsert(news(2));
            cache.remove(&1);
            assert_eq!(cache.get(&1), None);

            cache.upsert(news(3));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }
    }

    #[test]
    fn read_through_interception_pattern() {
        // get, on miss load and upsert; delete removes first
        for policy in POLICIES {
            let cache = build(policy, 8);
            let mut loads = 0;
            for _ in 0..3 {
                if cache.get(&42).is_none() {
                    loads += 1;
                    cache.upsert(news(42));
                }
            }
            assert_eq!(loads, 1);

            cache.remove(&42);
            assert_eq!(cache.get(&42), None);
        }
    }
}

mod lru_scenarios {
    use super::*;

    #[test]
    fn first_inserted_is_evicted_without_access() {
        let cache = build(CachePolicy::Lru, 3);
        for id in 1..=4 {
            cache.upsert(news(id));
        }
        assert!(!cache.contains(&1));
        for id in 2..=4 {
            assert!(cache.contains(&id));
        }
    }

    #[test]
    fn touched_entity_is_evicted_last() {
        let cache = build(CachePolicy::Lru, 3);
        for id in 1..=3 {
            cache.upsert(news(id));
        }
        cache.get(&1);
        cache.upsert(news(10));
        cache.upsert(news(11));

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(!cache.contains(&3));
    }

    #[test]
    fn capacity_two_scenario() {
        let cache = build(CachePolicy::Lru, 2);
        cache.upsert(news(1));
        cache.upsert(news(2));
        cache.get(&1);
        cache.upsert(news(3));

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(news(1)));
        assert_eq!(cache.get(&3), Some(news(3)));
    }
}

mod lfu_scenarios {
    use super::*;

    #[test]
    fn less_frequent_is_evicted() {
        let cache = build(CachePolicy::Lfu, 2);
        cache.upsert(news(1));
        cache.upsert(news(2));
        cache.get(&1);
        cache.upsert(news(3));

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn ties_evict_the_longest_resident() {
        let cache = build(CachePolicy::Lfu, 3);
        for id in 1..=3 {
            cache.upsert(news(id));
        }
        cache.upsert(news(4));
        assert!(!cache.contains(&1));
        cache.upsert(news(5));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn capacity_two_scenario() {
        let cache = build(CachePolicy::Lfu, 2);
        cache.upsert(news(1));
        cache.upsert(news(2));
        cache.get(&1);
        cache.get(&1);
        cache.upsert(news(3));

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(news(1)));
        assert_eq!(cache.get(&3), Some(news(3)));
    }

    #[test]
    fn frequent_entity_survives_a_scan() {
        let cache = build(CachePolicy::Lfu, 4);
        cache.upsert(news(0));
        for _ in 0..5 {
            cache.get(&0);
        }
        for id in 100..200 {
            cache.upsert(news(id));
        }
        assert!(cache.contains(&0));
    }
}

mod policies_differ {
    use super::*;

    #[test]
    fn same_sequence_evicts_different_entities() {
        let lru = build(CachePolicy::Lru, 2);
        let lfu = build(CachePolicy::Lfu, 2);

        for cache in [&lru, &lfu] {
            cache.upsert(news(1));
            cache.get(&1);
            cache.get(&1);
            cache.upsert(news(2));
            cache.get(&2);
            cache.upsert(news(3));
        }

        // LRU: 1 was touched longest ago. LFU: 2 has the lower count.
        assert!(!lru.contains(&1));
        assert!(lru.contains(&2));
        assert!(lfu.contains(&1));
        assert!(!lfu.contains(&2));
    }
}
