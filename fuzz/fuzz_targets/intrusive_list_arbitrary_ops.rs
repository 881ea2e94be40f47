#![no_main]

use idcache::ds::IntrusiveList;
use idcache::error::ListError;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Mixes push_front, unlink, push_front_existing, move_to_front, remove,
// pop_back and clear, including calls on stale handles.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut handles = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 8;
        let value = u32::from(pair[1]);
        let pick = usize::from(pair[1]);

        match op {
            0 => {
                let handle = list.push_front(value);
                handles.push(handle);
                assert_eq!(list.front(), Ok(&value));
            }
            1 => {
                if let Some(&handle) = handles.get(pick % handles.len().max(1)) {
                    let _ = list.unlink(handle);
                    assert!(!list.is_linked(handle));
                }
            }
            2 => {
                if let Some(&handle) = handles.get(pick % handles.len().max(1)) {
                    match list.push_front_existing(handle) {
                        Ok(()) => assert_eq!(list.front_handle(), Some(handle)),
                        Err(err) => assert!(matches!(
                            err,
                            ListError::AlreadyLinked | ListError::StaleHandle
                        )),
                    }
                }
            }
            3 => {
                if let Some(&handle) = handles.get(pick % handles.len().max(1)) {
                    if list.move_to_front(handle).is_ok() {
                        assert_eq!(list.front_handle(), Some(handle));
                    }
                }
            }
            4 => {
                if let Some(&handle) = handles.get(pick % handles.len().max(1)) {
                    if list.remove(handle).is_ok() {
                        assert!(!list.contains(handle));
                        assert_eq!(list.remove(handle), Err(ListError::StaleHandle));
                    }
                }
            }
            5 => {
                let old_len = list.len();
                match list.pop_back() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(err) => {
                        assert_eq!(err, ListError::Empty);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            6 => {
                let _ = list.back();
                assert_eq!(list.iter().count(), list.len());
            }
            7 => {
                list.clear();
                assert!(list.is_empty());
                assert!(handles.iter().all(|&handle| !list.contains(handle)));
                handles.clear();
            }
            _ => unreachable!(),
        }

        list.debug_validate_invariants();
        assert_eq!(list.is_empty(), list.front().is_err());
    }
});
