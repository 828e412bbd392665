/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-atomics
//!
//! Scheme-parameterized atomic cells: one generic type,
//! [`Atomic<T, S, NMUX>`](Atomic), whose synchronization strategy is a
//! type parameter instead of a fixed implementation detail.
//!
//! ## Design Goals
//!
//! - **One contract, many mechanisms**: every scheme gives each operation
//!   the same user-facing result; only the machinery differs
//! - **Compile-time capability matrix**: a (value type, scheme, operation)
//!   triple a scheme cannot honor is a missing trait impl, not a runtime
//!   error
//! - **Breadth of value types**: integers, floats, raw pointers, and
//!   trivially copyable user aggregates through bit punning or locking
//! - **Explicit orderings on demand**: every operation has plain,
//!   single-ordering, and success/failure-pair variants
//!
//! ## Schemes
//!
//! - [`Native`]: the standard library's fetch primitives, for the pairs
//!   they cover natively
//! - [`Strong`] / [`Weak`]: compare-exchange retry loops, the
//!   general-purpose default
//! - [`StrongPun`] / [`WeakPun`]: the same loops over a same-width
//!   unsigned-integer view of the value
//! - [`Lock`]: a singleton mutex per (value type, scheme, partition) from
//!   the process-wide [`registry`]
//! - [`Serial`]: no synchronization, confined to one thread by the type
//!   system
//! - `External<B>` (feature `external`): routes through a user-supplied
//!   backend's fetch primitives
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use prism3_atomics::{Atomic, Strong};
//!
//! // Basic usage: operations return the updated value.
//! let counter: Atomic<i32> = Atomic::new(0);
//! assert_eq!(counter.inc(), 1);
//! assert_eq!(counter.add(41), 42);
//!
//! // Concurrent usage under the default strong CAS scheme.
//! let counter: Arc<Atomic<u64, Strong>> = Arc::new(Atomic::new(0));
//! let mut handles = vec![];
//!
//! for _ in 0..10 {
//!     let counter = counter.clone();
//!     handles.push(thread::spawn(move || {
//!         for _ in 0..100 {
//!             counter.inc();
//!         }
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(counter.load(), 1000);
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomics;

// Expansion target of impl_punnable!; callers need no zerocopy dependency
// of their own.
#[doc(hidden)]
pub use zerocopy;

// Re-export the whole public surface at the crate root.
pub use atomics::{
    ops,
    registry,
    ApplyOp,
    Atomic,
    Lock,
    Lockless,
    Native,
    NativeOp,
    Operation,
    Primitive,
    PunPrim,
    Punnable,
    Scheme,
    SchemeRead,
    Serial,
    Strong,
    StrongPun,
    SyncOrder,
    ThreadSafe,
    Update,
    Weak,
    WeakPun,
};

/// Out-of-matrix (value type, scheme, operation) triples are build
/// failures, never run-time errors.
///
/// Multiplication has no meaning for raw pointers:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, Strong};
///
/// let mut value = 0u32;
/// let cell = Atomic::<*mut u32, Strong>::new(&mut value);
/// cell.mul(2usize);
/// ```
///
/// Floats carry no bitwise operations:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, Strong};
///
/// let cell = Atomic::<f64, Strong>::new(1.0);
/// cell.bitand(1.0f64);
/// ```
///
/// Shifts have no native fetch primitive:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, Native};
///
/// let cell = Atomic::<i32, Native>::new(1);
/// cell.shl(1u32);
/// ```
///
/// Serial cells cannot cross threads:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, Serial};
/// use std::sync::Arc;
/// use std::thread;
///
/// let cell = Arc::new(Atomic::<i32, Serial>::new(0));
/// let cell2 = cell.clone();
/// thread::spawn(move || cell2.inc());
/// ```
///
/// The lock scheme cannot be borrowed away from:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, Lock, Strong};
///
/// let cell = Atomic::<i32, Lock>::new(0);
/// cell.via::<Strong>();
/// ```
#[cfg(doctest)]
pub struct CapabilityMatrixIsClosed;

#[cfg(feature = "external")]
pub use atomics::{
    BackendAdd,
    BackendBitAnd,
    BackendBitOr,
    BackendBitXor,
    BackendDiv,
    BackendIncDec,
    BackendMax,
    BackendMin,
    BackendMul,
    BackendRem,
    BackendShl,
    BackendShr,
    BackendSub,
    External,
};
