#![no_main]

use std::collections::HashMap;

use idcache::ds::{SlotArena, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on SlotArena
//
// Tracks every id ever issued; removed ids must never resolve again, even
// after their slot is recycled.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u8> = SlotArena::new();
    let mut live: HashMap<SlotId, u8> = HashMap::new();
    let mut dead: Vec<SlotId> = Vec::new();
    let mut issued: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 4;
        let value = pair[1];

        match op {
            0 => {
                let id = arena.insert(value);
                assert!(live.insert(id, value).is_none());
                issued.push(id);
            }
            1 => {
                if !issued.is_empty() {
                    let id = issued[usize::from(value) % issued.len()];
                    let expected = live.remove(&id);
                    assert_eq!(arena.remove(id), expected);
                    if expected.is_some() {
                        dead.push(id);
                    }
                }
            }
            2 => {
                if let Some(&id) = issued.get(usize::from(value) % issued.len().max(1)) {
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                        live.insert(id, value);
                    }
                }
            }
            3 => {
                arena.clear();
                dead.extend(live.drain().map(|(id, _)| id));
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        for (&id, value) in &live {
            assert_eq!(arena.get(id), Some(value));
        }
        for &id in &dead {
            assert!(!arena.contains(id));
        }
    }
});
