/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use std::collections::HashSet;
use std::sync::{
    Arc,
    Barrier,
    Mutex,
};
use std::thread;

use prism3_atomics::{
    Atomic,
    Lock,
    Native,
    Strong,
    StrongPun,
    Weak,
    WeakPun,
};

const NUM_THREADS: usize = 10;
const ITERATIONS_PER_THREAD: usize = 1000;

// Half the threads add, half subtract; the cell must come back to zero.
fn add_sub_race<S>(cell: Arc<Atomic<i64, S>>)
where
    S: prism3_atomics::SchemeRead<i64>
        + prism3_atomics::ApplyOp<i64, prism3_atomics::ops::Add<i64>>
        + prism3_atomics::ApplyOp<i64, prism3_atomics::ops::Sub<i64>>
        + prism3_atomics::ThreadSafe,
{
    let barrier = Arc::new(Barrier::new(2 * NUM_THREADS));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let add_cell = cell.clone();
        let add_barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            add_barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                add_cell.add(1i64);
            }
        }));
        let sub_cell = cell.clone();
        let sub_barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            sub_barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                sub_cell.sub(1i64);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), 0);
}

#[test]
fn test_concurrent_add_sub_native() {
    add_sub_race(Arc::new(Atomic::<i64, Native>::new(0)));
}

#[test]
fn test_concurrent_add_sub_strong() {
    add_sub_race(Arc::new(Atomic::<i64, Strong>::new(0)));
}

#[test]
fn test_concurrent_add_sub_weak() {
    add_sub_race(Arc::new(Atomic::<i64, Weak>::new(0)));
}

#[test]
fn test_concurrent_add_sub_strong_pun() {
    add_sub_race(Arc::new(Atomic::<i64, StrongPun>::new(0)));
}

#[test]
fn test_concurrent_add_sub_weak_pun() {
    add_sub_race(Arc::new(Atomic::<i64, WeakPun>::new(0)));
}

#[test]
fn test_concurrent_add_sub_lock() {
    add_sub_race(Arc::new(Atomic::<i64, Lock>::new(0)));
}

// Every post-decrement observes a distinct old value: atomicity means no
// two threads can take the same one.
#[test]
fn test_concurrent_postdec_values_are_distinct() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 500;

    let cell = Arc::new(Atomic::<i64, Lock>::new((THREADS * PER_THREAD) as i64));
    let seen = Arc::new(Mutex::new(HashSet::new()));
    let mut handles = vec![];

    for _ in 0..THREADS {
        let cell = cell.clone();
        let seen = seen.clone();
        handles.push(thread::spawn(move || {
            let mut local = Vec::with_capacity(PER_THREAD);
            for _ in 0..PER_THREAD {
                local.push(cell.postdec());
            }
            let mut seen = seen.lock().unwrap();
            for value in local {
                assert!(seen.insert(value), "duplicate value {value}");
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), 0);
    assert_eq!(seen.lock().unwrap().len(), THREADS * PER_THREAD);
}

// Float accumulation is atomic per addition; the total is exact because
// small integers are exactly representable.
#[test]
fn test_concurrent_float_accumulation() {
    let cell = Arc::new(Atomic::<f64, Strong>::new(0.0));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let cell = cell.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..ITERATIONS_PER_THREAD {
                cell.add(1.0f64);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), (NUM_THREADS * ITERATIONS_PER_THREAD) as f64);
}

// Concurrent min/max settle on the global extremes.
#[test]
fn test_concurrent_min_max() {
    let low = Arc::new(Atomic::<i32, Strong>::new(i32::MAX));
    let high = Arc::new(Atomic::<i32, Strong>::new(i32::MIN));
    let mut handles = vec![];

    for i in 0..NUM_THREADS as i32 {
        let low = low.clone();
        let high = high.clone();
        handles.push(thread::spawn(move || {
            for j in 0..100 {
                let value = i * 1000 + j;
                low.min(value);
                high.max(value);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(low.load(), 0);
    assert_eq!(high.load(), (NUM_THREADS as i32 - 1) * 1000 + 99);
}

// A slow functional update under contention: the retry loop must publish
// each update exactly once.
#[test]
fn test_concurrent_update() {
    let cell = Arc::new(Atomic::<u64, Weak>::new(0));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let cell = cell.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..ITERATIONS_PER_THREAD {
                cell.update(|v| v + 1);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), (NUM_THREADS * ITERATIONS_PER_THREAD) as u64);
}
