/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomics::{
    impl_punnable,
    Atomic,
    Lock,
    Serial,
    StrongPun,
    WeakPun,
};
use zerocopy::{
    AsBytes,
    FromBytes,
    FromZeroes,
};

// A trivially copyable user aggregate. The explicit alignment lets the
// punned schemes view it as an AtomicU32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
#[repr(C, align(4))]
struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl_punnable!(Rgba => u32);

// A two-field pair punned as u32; without align(4) the layout check would
// reject it at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
#[repr(C, align(4))]
struct Pair {
    lo: u16,
    hi: u16,
}

impl_punnable!(Pair => u32);

#[test]
fn test_aggregate_load_store_strong_pun() {
    let white = Rgba { r: 255, g: 255, b: 255, a: 255 };
    let cell = Atomic::<Rgba, StrongPun>::new(white);
    assert_eq!(cell.load(), white);

    let red = Rgba { r: 255, g: 0, b: 0, a: 255 };
    cell.store(red);
    assert_eq!(cell.load(), red);
}

#[test]
fn test_aggregate_update_weak_pun() {
    let cell = Atomic::<Pair, WeakPun>::new(Pair { lo: 1, hi: 2 });
    let updated = cell.update(|p| Pair { lo: p.lo + 10, hi: p.hi * 3 });
    assert_eq!(updated, Pair { lo: 11, hi: 6 });
    assert_eq!(cell.load(), Pair { lo: 11, hi: 6 });
}

#[test]
fn test_aggregate_under_lock() {
    // The lock scheme needs no punning at all; any Copy aggregate works.
    let cell = Atomic::<Pair, Lock>::new(Pair { lo: 0, hi: 0 });
    cell.update(|p| Pair { lo: p.lo + 1, hi: p.hi });
    cell.update(|p| Pair { lo: p.lo, hi: p.hi + 7 });
    assert_eq!(cell.load(), Pair { lo: 1, hi: 7 });
}

#[test]
fn test_aggregate_under_serial() {
    let cell = Atomic::<Rgba, Serial>::new(Rgba { r: 0, g: 0, b: 0, a: 0 });
    cell.update(|c| Rgba { r: c.r + 1, ..c });
    assert_eq!(cell.load().r, 1);
}

#[test]
fn test_aggregate_concurrent_updates() {
    use std::sync::Arc;
    use std::thread;

    let cell = Arc::new(Atomic::<Pair, StrongPun>::new(Pair { lo: 0, hi: 0 }));
    let mut handles = vec![];

    for _ in 0..4 {
        let cell = cell.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..250 {
                cell.update(|p| Pair { lo: p.lo + 1, hi: p.hi + 2 });
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cell.load(), Pair { lo: 1000, hi: 2000 });
}
