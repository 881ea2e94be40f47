#![no_main]

use idcache::ds::FrequencyBuckets;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on FrequencyBuckets
//
// Keys move between buckets the way the LFU policy moves them; every
// bucket must stay FIFO and empty buckets must disappear.
fuzz_target!(|data: &[u8]| {
    let mut buckets: FrequencyBuckets<u8> = FrequencyBuckets::new();

    for triple in data.chunks_exact(3) {
        let op = triple[0] % 6;
        let key = triple[1] % 32;
        let freq = u64::from(triple[2] % 8) + 1;

        match op {
            0 => {
                let inserted = buckets.push_back(freq, key);
                if inserted {
                    assert_eq!(buckets.frequency_of(&key), Some(freq));
                    assert_eq!(buckets.iter_bucket(freq).last(), Some(&key));
                }
            }
            1 => {
                // promote like an LFU hit
                let was = buckets.frequency_of(&key);
                let now = buckets.touch(&key);
                assert_eq!(now, was.map(|f| f + 1));
                if let Some(freq) = now {
                    assert_eq!(buckets.iter_bucket(freq).last(), Some(&key));
                }
            }
            2 => {
                let was = buckets.frequency_of(&key);
                let removed = buckets.remove(freq, &key);
                assert_eq!(removed, was == Some(freq));
            }
            3 => {
                if let Some(lowest) = buckets.lowest_frequency() {
                    let front = buckets.front(lowest).copied();
                    assert_eq!(buckets.pop_front(lowest), front);
                } else {
                    assert!(buckets.is_empty());
                }
            }
            4 => {
                let total: usize = buckets.frequencies().map(|f| buckets.bucket_len(f)).sum();
                assert_eq!(total, buckets.len());
            }
            5 => {
                buckets.clear();
                assert_eq!(buckets.bucket_count(), 0);
            }
            _ => unreachable!(),
        }

        buckets.debug_validate_invariants();
    }
});
