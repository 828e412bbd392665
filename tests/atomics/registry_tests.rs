/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use std::sync::Mutex;

use prism3_atomics::registry::{
    mutex_for,
    MutexKey,
};
use prism3_atomics::{
    Atomic,
    Lock,
};

#[test]
fn test_same_key_yields_same_mutex() {
    let a = mutex_for(MutexKey::new::<i32, Lock>(0));
    let b = mutex_for(MutexKey::new::<i32, Lock>(0));
    assert!(std::ptr::eq::<Mutex<()>>(a, b));
}

#[test]
fn test_distinct_value_types_yield_distinct_mutexes() {
    let a = mutex_for(MutexKey::new::<i32, Lock>(0));
    let b = mutex_for(MutexKey::new::<i64, Lock>(0));
    assert!(!std::ptr::eq::<Mutex<()>>(a, b));
}

#[test]
fn test_distinct_partitions_yield_distinct_mutexes() {
    let a = mutex_for(MutexKey::new::<u32, Lock>(0));
    let b = mutex_for(MutexKey::new::<u32, Lock>(1));
    assert!(!std::ptr::eq::<Mutex<()>>(a, b));
}

#[test]
fn test_concurrent_first_use_settles_on_one_mutex() {
    use std::thread;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                mutex_for(MutexKey::new::<u128, Lock>(7)) as *const Mutex<()>
                    as usize
            })
        })
        .collect();

    let addresses: Vec<usize> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_partitioned_cells_do_not_share_a_mutex() {
    // Cells of the same value type but different NMUX run under different
    // mutexes; this only checks that both still update correctly.
    let a = Atomic::<i32, Lock, 0>::new(0);
    let b = Atomic::<i32, Lock, 1>::new(0);
    a.add(1i32);
    b.add(2i32);
    assert_eq!(a.load(), 1);
    assert_eq!(b.load(), 2);
}
