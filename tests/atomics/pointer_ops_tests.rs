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
    Lock,
    Serial,
    Strong,
    Weak,
};

#[test]
fn test_pointer_add_sub_in_pointee_units() {
    let mut buffer = [0u64; 8];
    let base = buffer.as_mut_ptr();
    let cell = Atomic::<*mut u64, Strong>::new(base);

    assert_eq!(cell.add(3usize), base.wrapping_add(3));
    assert_eq!(cell.sub(1usize), base.wrapping_add(2));
    assert_eq!(cell.load(), base.wrapping_add(2));
}

#[test]
fn test_pointer_inc_dec_contracts() {
    let mut buffer = [0u8; 4];
    let base = buffer.as_mut_ptr();
    let cell = Atomic::<*mut u8, Weak>::new(base);

    assert_eq!(cell.inc(), base.wrapping_add(1));
    assert_eq!(cell.postinc(), base.wrapping_add(1));
    assert_eq!(cell.load(), base.wrapping_add(2));
    assert_eq!(cell.predec(), base.wrapping_add(1));
    assert_eq!(cell.postdec(), base.wrapping_add(1));
    assert_eq!(cell.load(), base);
}

#[test]
fn test_pointer_min_max_by_address() {
    let mut buffer = [0u32; 8];
    let low = buffer.as_mut_ptr();
    let high = low.wrapping_add(4);
    let cell = Atomic::<*mut u32, Strong>::new(high);

    assert_eq!(cell.min(low), low);
    assert_eq!(cell.max(high), high);
    assert_eq!(cell.max(low), high);
}

#[test]
fn test_pointer_under_lock_and_serial() {
    let mut buffer = [0i32; 8];
    let base = buffer.as_mut_ptr();

    let cell = Atomic::<*mut i32, Lock>::new(base);
    assert_eq!(cell.add(2usize), base.wrapping_add(2));

    let cell = Atomic::<*mut i32, Serial>::new(base);
    assert_eq!(cell.add(5usize), base.wrapping_add(5));
    assert_eq!(cell.load(), base.wrapping_add(5));
}
