#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList.
//
// Random sequences of push_front, pop_front, pop_back, move_to_front,
// remove, and clear; every step re-validates the link structure.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                let id = list.push_front(value);
                ids.push(id);

                assert_eq!(list.front(), Some(&value));
                assert!(list.contains(id));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                if list.pop_front().is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            },
            2 => {
                let old_len = list.len();
                if list.pop_back().is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            },
            3 => {
                if !ids.is_empty() {
                    let id = ids[(value as usize) % ids.len()];
                    let moved = list.move_to_front(id);
                    if moved {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            },
            4 => {
                if !ids.is_empty() {
                    let id = ids[(value as usize) % ids.len()];
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                    }
                    assert!(!list.contains(id));
                    assert_eq!(list.remove(id), None);
                }
            },
            _ => {
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.front_id(), None);
            },
        }

        list.check_invariants().expect("list invariants violated");
        assert_eq!(list.iter().count(), list.len());

        idx += 2;
    }
});
