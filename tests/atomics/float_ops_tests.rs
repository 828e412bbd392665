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
    StrongPun,
    Weak,
    WeakPun,
};

const EPSILON_F64: f64 = 1e-12;

#[test]
fn test_f64_arithmetic_strong() {
    let cell = Atomic::<f64, Strong>::new(2.5);
    assert!((cell.add(1.5f64) - 4.0).abs() < EPSILON_F64);
    assert!((cell.sub(2.0f64) - 2.0).abs() < EPSILON_F64);
    assert!((cell.mul(3.0f64) - 6.0).abs() < EPSILON_F64);
    assert!((cell.div(4.0f64) - 1.5).abs() < EPSILON_F64);
}

#[test]
fn test_f32_arithmetic_weak_pun() {
    // The punned weak loop: the descriptor sees f32, the exchange runs on
    // the u32 view.
    let cell = Atomic::<f32, WeakPun>::new(5.0);
    assert_eq!(cell.mul(3.0f32), 15.0);
    assert_eq!(cell.load(), 15.0);
}

#[test]
fn test_f64_min_max() {
    let cell = Atomic::<f64, Strong>::new(10.0);
    assert_eq!(cell.min(2.5f64), 2.5);
    assert_eq!(cell.min(7.0f64), 2.5);
    assert_eq!(cell.max(8.0f64), 8.0);
    assert_eq!(cell.max(-1.0f64), 8.0);
}

#[test]
fn test_f64_inc_dec_contracts() {
    let cell = Atomic::<f64, Strong>::new(1.0);
    assert_eq!(cell.inc(), 2.0);
    assert_eq!(cell.postinc(), 2.0);
    assert_eq!(cell.load(), 3.0);
    assert_eq!(cell.predec(), 2.0);
    assert_eq!(cell.postdec(), 2.0);
    assert_eq!(cell.load(), 1.0);
}

#[test]
fn test_float_schemes_agree() {
    fn run<S>(cell: &Atomic<f64, S>) -> f64
    where
        S: prism3_atomics::SchemeRead<f64>
            + prism3_atomics::ApplyOp<f64, prism3_atomics::ops::Add<f64>>
            + prism3_atomics::ApplyOp<f64, prism3_atomics::ops::Div<f64>>,
    {
        cell.add(0.5f64);
        cell.div(2.0f64);
        cell.load()
    }

    let expected = run(&Atomic::<f64, Strong>::new(3.0));
    assert!((run(&Atomic::<f64, Weak>::new(3.0)) - expected).abs() < EPSILON_F64);
    assert!(
        (run(&Atomic::<f64, StrongPun>::new(3.0)) - expected).abs()
            < EPSILON_F64
    );
    assert!(
        (run(&Atomic::<f64, WeakPun>::new(3.0)) - expected).abs() < EPSILON_F64
    );
    assert!((run(&Atomic::<f64, Lock>::new(3.0)) - expected).abs() < EPSILON_F64);
    assert!(
        (run(&Atomic::<f64, Serial>::new(3.0)) - expected).abs() < EPSILON_F64
    );
}

#[test]
fn test_negative_zero_round_trips() {
    // Bit-exact storage: -0.0 stays -0.0 through the punned view.
    let cell = Atomic::<f64, StrongPun>::new(-0.0);
    assert!(cell.load().is_sign_negative());
}

#[test]
fn test_nan_update() {
    // A NaN in the cell does not wedge the compare-exchange loop, since
    // comparison happens on the bit pattern rather than by float equality.
    let cell = Atomic::<f64, Strong>::new(f64::NAN);
    let result = cell.add(1.0f64);
    assert!(result.is_nan());
    assert!(cell.load().is_nan());
}
