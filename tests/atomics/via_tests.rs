/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomics::{
    Atomic,
    Native,
    Serial,
    Strong,
    StrongPun,
    Weak,
    WeakPun,
};

#[test]
fn test_via_weak_on_strong_cell() {
    let cell = Atomic::<u32, Strong>::new(10);
    cell.add(10u32);
    assert_eq!(cell.via::<Weak>().add(20u32), 40);
    assert_eq!(cell.load(), 40);
}

#[test]
fn test_via_reaches_native_only_operations() {
    // A strong cell borrowing the native scheme for one fetch_add.
    let cell = Atomic::<i32, Strong>::new(1);
    assert_eq!(cell.via::<Native>().add(1i32), 2);
    // And a native cell borrowing the CAS loop for a multiply, which has
    // no native primitive.
    let cell = Atomic::<i32, Native>::new(6);
    assert_eq!(cell.via::<Strong>().mul(7i32), 42);
}

#[test]
fn test_via_punned_view() {
    let cell = Atomic::<f32, StrongPun>::new(2.0);
    assert_eq!(cell.via::<WeakPun>().mul(4.0f32), 8.0);
    assert_eq!(cell.load(), 8.0);
}

#[test]
fn test_via_interleaves_with_original_scheme() {
    use std::sync::Arc;
    use std::thread;

    // Half the threads use the cell's own scheme, half override to the
    // weak loop; all updates must still land.
    let cell = Arc::new(Atomic::<u64, Strong>::new(0));
    let mut handles = vec![];

    for i in 0..8 {
        let cell = cell.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                if i % 2 == 0 {
                    cell.add(1u64);
                } else {
                    cell.via::<Weak>().add(1u64);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), 4000);
}

#[test]
fn test_via_unchecked_serial() {
    // Sound here: the cell never crosses a thread boundary.
    let cell = Atomic::<i32, Strong>::new(5);
    let serial = unsafe { cell.via_unchecked::<Serial>() };
    assert_eq!(serial.add(5i32), 10);
    assert_eq!(cell.load(), 10);
}
