//! Multi-thread behavior of the shared container flavors.

use std::thread;

use tamp::{AtomicPackedVec, CasPackedVec};

const THREADS: usize = 4;

#[test]
fn same_word_writes_do_not_tear() {
    // Width 13 over 64-bit words: neighbors share words, so every thread
    // constantly collides with the others inside a word while owning a
    // disjoint set of elements.
    const SIZE: usize = 64;
    const ROUNDS: u32 = 500;

    let v = AtomicPackedVec::<u32>::with_len(13, SIZE).unwrap();
    thread::scope(|s| {
        for tid in 0..THREADS {
            let v = &v;
            s.spawn(move || {
                for round in 0..ROUNDS {
                    let mut i = tid;
                    while i < SIZE {
                        v.store(i, round + 1).unwrap();
                        i += THREADS;
                    }
                }
            });
        }
    });

    for i in 0..SIZE {
        assert_eq!(v.get(i), Some(ROUNDS));
    }
}

#[test]
fn straddling_writes_do_not_corrupt_neighbors() {
    // Width 7 never divides 64, so elements regularly span two words.
    const SIZE: usize = 1000;
    const ROUNDS: u32 = 100;

    let v = AtomicPackedVec::<u32>::with_len(7, SIZE).unwrap();
    thread::scope(|s| {
        for tid in 0..THREADS {
            let v = &v;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    let mut i = tid;
                    while i < SIZE {
                        v.store(i, (i % 128) as u32).unwrap();
                        i += THREADS;
                    }
                }
            });
        }
    });

    for i in 0..SIZE {
        assert_eq!(v.get(i), Some((i % 128) as u32));
    }
}

fn cas_sweep(width: usize, size: usize) {
    let v = CasPackedVec::<u32>::with_len(width, size).unwrap();

    let successes: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (1..=THREADS as u32)
            .map(|tid| {
                let v = &v;
                s.spawn(move || {
                    let mut wins = 0usize;
                    for i in 0..size {
                        if v.cas(i, tid, 0).unwrap() {
                            wins += 1;
                        }
                    }
                    wins
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Every element was claimed exactly once, by exactly one thread.
    assert_eq!(successes.iter().sum::<usize>(), size);
    let mut per_thread = vec![0usize; THREADS];
    for i in 0..size {
        let val = v.get(i).unwrap();
        assert!((1..=THREADS as u32).contains(&val), "element {i} holds {val}");
        per_thread[(val - 1) as usize] += 1;
    }
    assert_eq!(per_thread, successes);
}

#[test]
fn cas_claims_every_element_exactly_once() {
    // Width 3 with 63 used bits divides evenly: no element straddles.
    cas_sweep(3, 1 << 16);
}

#[test]
fn cas_claims_every_element_exactly_once_with_straddling() {
    // Width 5 with 63 used bits: every 63rd element crosses a word
    // boundary and takes the marked two-word path.
    cas_sweep(5, 1 << 14);
}

#[test]
fn cas_through_shared_cursor() {
    const SIZE: usize = 4096;

    let v = CasPackedVec::<u32>::with_len(5, SIZE).unwrap();
    let successes: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (1..=THREADS as u32)
            .map(|tid| {
                let v = &v;
                s.spawn(move || {
                    let mut it = v.cursor();
                    let mut wins = 0usize;
                    for _ in 0..SIZE {
                        if it.cas(tid, 0) {
                            wins += 1;
                        }
                        it.next();
                    }
                    wins
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(successes.iter().sum::<usize>(), SIZE);
    for i in 0..SIZE {
        let val = v.get(i).unwrap();
        assert!((1..=THREADS as u32).contains(&val));
    }
}

#[test]
fn concurrent_reads_observe_committed_values() {
    const SIZE: usize = 10_000;

    let v = AtomicPackedVec::<u32>::with_len(9, SIZE).unwrap();
    for i in 0..SIZE {
        v.store(i, (i % 512) as u32).unwrap();
    }
    thread::scope(|s| {
        for _ in 0..THREADS {
            let v = &v;
            s.spawn(move || {
                for i in 0..SIZE {
                    assert_eq!(v.get(i), Some((i % 512) as u32));
                }
            });
        }
    });
}
