#![no_main]

use idcache::policy::lru::LruCore;
use idcache::traits::{CoreCache, LruCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LruCore
//
// First byte picks the capacity; the rest are (op, id) pairs.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: LruCore<u8, (u8, u32)> = LruCore::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let id = pair[1] % 48;
        match pair[0] % 5 {
            0 => {
                let was_full = cache.len() == capacity;
                let was_resident = cache.contains(&id);
                let next_victim = cache.peek_lru().map(|entity| entity.0);
                cache.upsert((id, step as u32));
                if capacity > 0 {
                    assert_eq!(cache.recency_rank(&id), Some(0));
                    if was_full && !was_resident {
                        if let Some(victim) = next_victim {
                            assert!(!cache.contains(&victim));
                        }
                    }
                }
            }
            1 => {
                let resident = cache.contains(&id);
                assert_eq!(cache.get(&id).is_some(), resident);
                if resident {
                    assert_eq!(cache.recency_order().first(), Some(&id));
                }
            }
            2 => {
                let resident = cache.contains(&id);
                assert_eq!(cache.remove(&id).is_some(), resident);
                assert!(!cache.contains(&id));
            }
            3 => {
                let _ = cache.peek_lru();
            }
            4 => {
                if pair[1] == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});
