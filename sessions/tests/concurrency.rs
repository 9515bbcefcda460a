use hearth_sessions::{Attributes, FlashKind, FlashQueue, SessionId, SessionStore};
use std::{
    collections::HashSet,
    sync::{Arc, Barrier},
    thread,
};

const THREADS: usize = 16;
const PER_THREAD: usize = 250;

#[test]
fn concurrent_creates_yield_distinct_ids() {
    let store = SessionStore::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles = (0..THREADS)
        .map(|n| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|i| {
                        let mut attributes = Attributes::new();
                        attributes.insert("n".into(), (n * PER_THREAD + i).into());
                        store.create(attributes)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let ids = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    let distinct = ids.iter().cloned().collect::<HashSet<_>>();
    assert_eq!(distinct.len(), THREADS * PER_THREAD);
    assert_eq!(store.len(), THREADS * PER_THREAD);

    for id in &ids {
        assert!(store.get(id).unwrap().get::<usize>("n").is_some());
    }
}

#[test]
fn concurrent_pops_deliver_each_flash_once() {
    let flashes = FlashQueue::new().with_capacity_per_session(THREADS * PER_THREAD);
    let id = SessionId::generate();
    for i in 0..THREADS * PER_THREAD {
        flashes.push(&id, FlashKind::Info, i.to_string());
    }

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles = (0..THREADS)
        .map(|_| {
            let flashes = flashes.clone();
            let barrier = barrier.clone();
            let id = id.clone();
            thread::spawn(move || {
                barrier.wait();
                let mut seen = Vec::new();
                while let Some(flash) = flashes.pop_one(&id) {
                    seen.push(flash.into_parts().1);
                }
                seen
            })
        })
        .collect::<Vec<_>>();

    let delivered = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    let distinct = delivered.iter().collect::<HashSet<_>>();
    assert_eq!(delivered.len(), THREADS * PER_THREAD);
    assert_eq!(distinct.len(), THREADS * PER_THREAD);
    assert_eq!(flashes.pending_sessions(), 0);
}

#[test]
fn a_single_flash_is_seen_by_exactly_one_racer() {
    for _ in 0..100 {
        let flashes = FlashQueue::new();
        let id = SessionId::generate();
        flashes.push(&id, FlashKind::Success, "X");

        let barrier = Arc::new(Barrier::new(2));
        let racers = (0..2)
            .map(|_| {
                let (flashes, barrier, id) = (flashes.clone(), barrier.clone(), id.clone());
                thread::spawn(move || {
                    barrier.wait();
                    flashes.pop_one(&id).is_some()
                })
            })
            .collect::<Vec<_>>();

        let winners = racers
            .into_iter()
            .map(|racer| racer.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
