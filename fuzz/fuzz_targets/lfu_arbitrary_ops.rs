#![no_main]

use idcache::policy::lfu::LfuCore;
use idcache::traits::{CoreCache, LfuCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LfuCore
//
// First byte picks the capacity; the rest are (op, id) pairs.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: LfuCore<u8, (u8, u32)> = LfuCore::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let id = pair[1] % 48;
        match pair[0] % 5 {
            0 => {
                let before = cache.frequency(&id);
                let was_full = cache.len() == capacity;
                let next_victim = cache.peek_lfu().map(|entity| entity.0);
                cache.upsert((id, step as u32));
                if capacity > 0 {
                    match before {
                        Some(freq) => assert_eq!(cache.frequency(&id), Some(freq + 1)),
                        None => {
                            assert_eq!(cache.frequency(&id), Some(1));
                            assert_eq!(cache.min_frequency(), Some(1));
                            if was_full {
                                if let Some(victim) = next_victim {
                                    assert!(!cache.contains(&victim));
                                }
                            }
                        }
                    }
                }
            }
            1 => {
                let before = cache.frequency(&id);
                assert_eq!(cache.get(&id).is_some(), before.is_some());
                assert_eq!(cache.frequency(&id), before.map(|f| f + 1));
            }
            2 => {
                let resident = cache.contains(&id);
                assert_eq!(cache.remove(&id).is_some(), resident);
                assert_eq!(cache.frequency(&id), None);
            }
            3 => {
                if let Some(entity) = cache.peek_lfu() {
                    let freq = cache.frequency(&entity.0);
                    assert_eq!(freq, cache.min_frequency());
                }
            }
            4 => {
                if pair[1] == 0 {
                    cache.clear();
                    assert_eq!(cache.min_frequency(), None);
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});
