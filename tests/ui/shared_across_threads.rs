use std::sync::{Arc, Mutex};
use std::thread;

use growable_bitvec::BitVector;

fn assert_send_sync<T: Send + Sync>() {}

fn main() {
    assert_send_sync::<BitVector>();

    let shared = Arc::new(Mutex::new(BitVector::new()));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for idx in (t * 100)..(t * 100 + 100) {
                    shared.lock().unwrap().set(idx);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.lock().unwrap().cardinality(), 400);
}
