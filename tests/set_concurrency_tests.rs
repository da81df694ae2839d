//! Concurrency tests for synchronized sets.
//!
//! These tests share one `SyncSet` between threads and check for lost
//! updates, torn batches and lock-order deadlocks.
//!
//! # Running these tests
//!
//! ```bash
//! cargo test --test set_concurrency_tests
//! ```

use guarded_set::set::SyncSet;
use rstest::rstest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, mpsc};
use std::thread;
use std::time::Duration;

const THREADS: u32 = 8;
const PER_THREAD: u32 = 1000;

/// Disjoint ranges added from many threads lose nothing.
#[rstest]
fn test_concurrent_disjoint_adds_are_not_lost() {
    let set: Arc<SyncSet<u32>> = Arc::new(SyncSet::new());
    let barrier = Arc::new(Barrier::new(THREADS as usize));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for value in worker * PER_THREAD..(worker + 1) * PER_THREAD {
                    set.add(value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(set.size(), (THREADS * PER_THREAD) as usize);
}

/// `add_if_absent` hands each value to exactly one racing thread.
#[rstest]
fn test_add_if_absent_has_single_winner() {
    let set: Arc<SyncSet<u32>> = Arc::new(SyncSet::new());
    let barrier = Arc::new(Barrier::new(THREADS as usize));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD).filter(|value| set.add_if_absent(*value)).count()
            })
        })
        .collect();

    let wins: usize = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .sum();

    assert_eq!(wins, PER_THREAD as usize);
}

/// Readers observe either none or all of a batch.
#[rstest]
fn test_batch_add_is_never_observed_partially() {
    const BATCH: u32 = 500;
    let set: Arc<SyncSet<u32>> = Arc::new(SyncSet::new());
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let set = Arc::clone(&set);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut observations = 0;
            loop {
                let finished = done.load(Ordering::Acquire);
                let size = set.size();
                assert_eq!(size % BATCH as usize, 0, "observed a torn batch");
                observations += 1;
                if finished {
                    break observations;
                }
            }
        })
    };

    for round in 0..20 {
        set.batch_add(round * BATCH..(round + 1) * BATCH);
    }
    done.store(true, Ordering::Release);

    let observations = reader.join().expect("Reader panicked");
    assert!(observations > 0);
    assert_eq!(set.size(), (20 * BATCH) as usize);
}

/// Opposite-order binary operations on the same pair keep making progress
/// while writers on both sets run continuously.
#[rstest]
fn test_opposite_order_algebra_with_writers() {
    const CALLS: usize = 2000;
    let left: Arc<SyncSet<u32>> = Arc::new((0..200).collect());
    let right: Arc<SyncSet<u32>> = Arc::new((100..300).collect());
    let stop = Arc::new(AtomicBool::new(false));
    let (progress, completed) = mpsc::channel::<()>();

    let mut handles = Vec::new();
    for worker in 0..4u32 {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        let stop = Arc::clone(&stop);
        let progress = progress.clone();
        handles.push(thread::spawn(move || {
            while !stop.load(Ordering::Acquire) {
                if worker % 2 == 0 {
                    let _ = left.union(&right);
                    let _ = left.inter(&right);
                } else {
                    let _ = right.union(&left);
                    let _ = right.diff(&left);
                }
                if progress.send(()).is_err() {
                    break;
                }
            }
        }));
    }
    drop(progress);
    for writer in 0..2u32 {
        let target = if writer == 0 {
            Arc::clone(&left)
        } else {
            Arc::clone(&right)
        };
        let stop = Arc::clone(&stop);
        handles.push(thread::spawn(move || {
            let value = 1000 + writer * 1000;
            while !stop.load(Ordering::Acquire) {
                target.add(value);
                target.remove(&value);
            }
        }));
    }

    for call in 0..CALLS {
        if completed.recv_timeout(Duration::from_secs(5)).is_err() {
            stop.store(true, Ordering::Release);
            panic!("algebra calls stalled after {call} completions");
        }
    }
    stop.store(true, Ordering::Release);
    drop(completed);

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(left.size(), 200);
    assert_eq!(right.size(), 200);
}

/// A result moved into a synchronized set can be shared afterwards.
#[rstest]
fn test_algebra_result_shared_after_conversion() {
    let left: SyncSet<u32> = (0..10).collect();
    let right: SyncSet<u32> = (5..15).collect();
    let shared: Arc<SyncSet<u32>> = Arc::new(left.union(&right).into_policy());

    let handles: Vec<_> = (0..4u32)
        .map(|worker| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                shared.add(100 + worker);
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(shared.size(), 19);
}
