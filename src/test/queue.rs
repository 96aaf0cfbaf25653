use crate::sim::TransferQueue;
use std::collections::HashSet;
use std::sync::Mutex;

#[test]
fn claims_are_monotonic_and_stop_at_len() {
    let q = TransferQueue::new(3);
    assert_eq!(q.claim_next(), Some(0));
    assert_eq!(q.claim_next(), Some(1));
    assert_eq!(q.claim_next(), Some(2));
    assert_eq!(q.claim_next(), None);
    assert_eq!(q.claim_next(), None);
    assert_eq!(q.len(), 3);
}

#[test]
fn empty_queue_is_exhausted_immediately() {
    let q = TransferQueue::new(0);
    assert!(q.is_empty());
    assert_eq!(q.claim_next(), None);
    assert_eq!(q.claim_next(), None);
}

#[test]
fn concurrent_claims_cover_every_index_exactly_once() {
    const N: usize = 10_000;
    let q = TransferQueue::new(N);
    let claimed = Mutex::new(Vec::with_capacity(N));

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let mut mine = Vec::new();
                while let Some(i) = q.claim_next() {
                    if let Some(&last) = mine.last() {
                        assert!(i > last, "claims must increase per worker");
                    }
                    mine.push(i);
                }
                claimed.lock().expect("claimed lock").extend(mine);
            });
        }
    });

    let claimed = claimed.into_inner().expect("claimed lock");
    assert_eq!(claimed.len(), N);
    let unique: HashSet<usize> = claimed.iter().copied().collect();
    assert_eq!(unique, (0..N).collect::<HashSet<_>>());
}
