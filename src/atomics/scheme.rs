/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Scheme Strategies
//!
//! The interchangeable strategies by which an [`Atomic`](crate::Atomic)
//! cell achieves atomicity. Each scheme is a zero-sized tag implementing
//! [`ApplyOp`] for the (value type, operation) pairs it supports, which is
//! exactly how the capability matrix is enforced: an unsupported triple is
//! a missing impl and fails to compile.
//!
//! | scheme        | mechanism                                        |
//! |---------------|--------------------------------------------------|
//! | [`Native`]    | one standard library fetch primitive             |
//! | [`Strong`]    | strong compare-exchange retry loop               |
//! | [`StrongPun`] | strong loop over the punned integral view        |
//! | [`Weak`]      | weak compare-exchange retry loop                 |
//! | [`WeakPun`]   | weak loop over the punned integral view          |
//! | [`Lock`]      | singleton mutex from the process-wide registry   |
//! | [`Serial`]    | direct update, single-threaded use only          |
//!
//! The compare-and-swap loops atomicize only the destination cell. Side
//! effects inside an operation descriptor run once per retry iteration
//! and are not atomicized.
//!
//! # Author
//!
//! Haixing Hu

use crossbeam_utils::Backoff;

use crate::atomics::atomic::Atomic;
use crate::atomics::ops::{
    NativeOp,
    Operation,
};
use crate::atomics::order::SyncOrder;
use crate::atomics::primitive::Primitive;
use crate::atomics::pun::Punnable;
use crate::atomics::registry;
use crate::atomics::sealed::Sealed;

/// A scheme tag. Sealed: the set of schemes is closed.
///
/// # Author
///
/// Haixing Hu
pub trait Scheme: Sealed + Sized + Send + Sync + 'static {
    /// Short lowercase name, used by `Debug` formatting.
    const NAME: &'static str;
}

/// Schemes whose cells may be shared across threads.
///
/// Every scheme except [`Serial`] qualifies; `Atomic` implements `Sync`
/// only for these, so handing a serial cell to another thread is a build
/// failure rather than a data race.
pub trait ThreadSafe: Scheme {}

/// Schemes that touch the cell exclusively through same-width atomic
/// instructions.
///
/// These may be freely substituted for one another on the same cell, even
/// call by call, which is what [`Atomic::via`](crate::Atomic::via) allows.
/// [`Lock`] is excluded: mixing mutex-guarded plain access with atomic
/// access on one cell would race. The external backend scheme is excluded
/// for the same reason: its primitives may synchronize internally in ways
/// the std atomic instructions cannot observe.
pub trait Lockless: ThreadSafe {}

/// Applies operation `O` to a cell of `T` under scheme `Self`.
///
/// # Author
///
/// Haixing Hu
pub trait ApplyOp<T, O>: Scheme {
    /// Runs the operation to completion and returns its contract value.
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T;
}

/// Scheme-specific load and store.
///
/// Rust has no benign racy read: a plain load concurrent with any write
/// is undefined behavior. Snapshot reads therefore go through each
/// scheme's own synchronized path instead of a bare memory read.
///
/// # Author
///
/// Haixing Hu
pub trait SchemeRead<T>: Scheme {
    /// Reads the current value.
    fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T;

    /// Replaces the current value.
    fn write<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>, value: T);
}

/// One call into the matching standard library fetch primitive.
///
/// Defined only for integer value types and for the operations the
/// standard library exposes natively (add, sub, bitwise, min, max and the
/// inc/dec family). Honors the caller's single (success) ordering; the
/// failure ordering is meaningless here because nothing can fail.
#[derive(Copy, Clone, Debug, Default)]
pub struct Native;

/// Strong compare-exchange retry loop; never fails spuriously.
///
/// The general-purpose path: works for any value type with a primitive
/// atomic view and any operation defined on that type. This is the
/// default scheme.
#[derive(Copy, Clone, Debug, Default)]
pub struct Strong;

/// Weak compare-exchange retry loop.
///
/// The exchange may fail spuriously even when the expected value matches,
/// in return for a cheaper instruction on some targets; the loop absorbs
/// the extra iterations.
#[derive(Copy, Clone, Debug, Default)]
pub struct Weak;

/// [`Strong`], with the exchange routed through the punned integral view.
///
/// The operation descriptor still sees the real value type; only the
/// final compare-exchange runs on the [`Punnable::Pun`] stand-in. Useful
/// where the integral exchange is the fast path regardless of the value's
/// real identity.
#[derive(Copy, Clone, Debug, Default)]
pub struct StrongPun;

/// [`Weak`], with the exchange routed through the punned integral view.
#[derive(Copy, Clone, Debug, Default)]
pub struct WeakPun;

/// Mutex-guarded critical section.
///
/// Acquires the singleton mutex for (value type, scheme, partition) from
/// the [`registry`](crate::registry) and read-modify-writes the cell
/// directly while holding it. Correctness comes entirely from mutual
/// exclusion: every concurrent accessor of a shared cell must use this
/// scheme with the same partition, or the mutex protects nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lock;

/// No coordination at all; single-threaded use only.
///
/// Cells with this scheme are not `Sync`, so the single-threaded
/// restriction is enforced at compile time rather than by convention.
#[derive(Copy, Clone, Debug, Default)]
pub struct Serial;

impl Sealed for Native {}
impl Sealed for Strong {}
impl Sealed for Weak {}
impl Sealed for StrongPun {}
impl Sealed for WeakPun {}
impl Sealed for Lock {}
impl Sealed for Serial {}

impl Scheme for Native {
    const NAME: &'static str = "native";
}

impl Scheme for Strong {
    const NAME: &'static str = "strong";
}

impl Scheme for Weak {
    const NAME: &'static str = "weak";
}

impl Scheme for StrongPun {
    const NAME: &'static str = "strong::pun";
}

impl Scheme for WeakPun {
    const NAME: &'static str = "weak::pun";
}

impl Scheme for Lock {
    const NAME: &'static str = "lock";
}

impl Scheme for Serial {
    const NAME: &'static str = "serial";
}

impl ThreadSafe for Native {}
impl ThreadSafe for Strong {}
impl ThreadSafe for Weak {}
impl ThreadSafe for StrongPun {}
impl ThreadSafe for WeakPun {}
impl ThreadSafe for Lock {}

impl Lockless for Native {}
impl Lockless for Strong {}
impl Lockless for Weak {}
impl Lockless for StrongPun {}
impl Lockless for WeakPun {}

impl<T, O> ApplyOp<T, O> for Native
where
    T: Primitive,
    O: NativeOp<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T {
        op.apply_native(atom.native(), sync.success)
    }
}

impl<T, O> ApplyOp<T, O> for Strong
where
    T: Primitive,
    O: Operation<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T {
        let native = atom.native();
        let mut old = T::load(native, sync.failure);
        loop {
            let next = op.apply(old);
            match T::compare_exchange(
                native,
                old,
                next.new,
                sync.success,
                sync.failure,
            ) {
                Ok(_) => return next.ret,
                // The failed exchange already re-read the cell.
                Err(actual) => old = actual,
            }
        }
    }
}

impl<T, O> ApplyOp<T, O> for Weak
where
    T: Primitive,
    O: Operation<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T {
        let native = atom.native();
        let backoff = Backoff::new();
        let mut old = T::load(native, sync.failure);
        loop {
            let next = op.apply(old);
            match T::compare_exchange_weak(
                native,
                old,
                next.new,
                sync.success,
                sync.failure,
            ) {
                Ok(_) => return next.ret,
                Err(actual) => {
                    old = actual;
                    backoff.spin();
                }
            }
        }
    }
}

impl<T, O> ApplyOp<T, O> for StrongPun
where
    T: Punnable,
    O: Operation<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T {
        let punned = atom.punned();
        let mut old = <T::Pun as Primitive>::load(punned, sync.failure);
        loop {
            let next = op.apply(T::from_pun(old));
            match <T::Pun as Primitive>::compare_exchange(
                punned,
                old,
                next.new.to_pun(),
                sync.success,
                sync.failure,
            ) {
                Ok(_) => return next.ret,
                Err(actual) => old = actual,
            }
        }
    }
}

impl<T, O> ApplyOp<T, O> for WeakPun
where
    T: Punnable,
    O: Operation<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        sync: SyncOrder,
    ) -> T {
        let punned = atom.punned();
        let backoff = Backoff::new();
        let mut old = <T::Pun as Primitive>::load(punned, sync.failure);
        loop {
            let next = op.apply(T::from_pun(old));
            match <T::Pun as Primitive>::compare_exchange_weak(
                punned,
                old,
                next.new.to_pun(),
                sync.success,
                sync.failure,
            ) {
                Ok(_) => return next.ret,
                Err(actual) => {
                    old = actual;
                    backoff.spin();
                }
            }
        }
    }
}

impl<T, O> ApplyOp<T, O> for Lock
where
    T: Copy + 'static,
    O: Operation<T>,
{
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        _sync: SyncOrder,
    ) -> T {
        let mutex = registry::mutex_for(atom.mutex_key());
        // A poisoned guard means another accessor panicked inside its
        // descriptor; the cell still holds a complete value of T.
        let _guard = mutex
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // SAFETY: the registry mutex serializes every accessor that
        // honors the lock scheme's key contract; no atomic instruction
        // is needed while it is held.
        unsafe {
            let ptr = atom.raw();
            let next = op.apply(ptr.read());
            ptr.write(next.new);
            next.ret
        }
    }
}

impl<T, O> ApplyOp<T, O> for Serial
where
    T: Copy,
    O: Operation<T>,
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        op: &O,
        _sync: SyncOrder,
    ) -> T {
        // SAFETY: serial cells are not Sync, so this reference is only
        // reachable from one thread.
        unsafe {
            let ptr = atom.raw();
            let next = op.apply(ptr.read());
            ptr.write(next.new);
            next.ret
        }
    }
}

/// Load/store through the primitive atomic view, shared by the native and
/// unpunned CAS schemes. Acquire loads and release stores, the crate's
/// usual defaults for plain reads and writes.
macro_rules! impl_primitive_read {
    ($($scheme:ty),* $(,)?) => {$(
        impl<T: Primitive> SchemeRead<T> for $scheme {
            #[inline]
            fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T {
                T::load(atom.native(), std::sync::atomic::Ordering::Acquire)
            }

            #[inline]
            fn write<const NMUX: usize>(
                atom: &Atomic<T, Self, NMUX>,
                value: T,
            ) {
                T::store(
                    atom.native(),
                    value,
                    std::sync::atomic::Ordering::Release,
                );
            }
        }
    )*};
}

impl_primitive_read!(Native, Strong, Weak);

/// Load/store through the punned view for the punned schemes.
macro_rules! impl_punned_read {
    ($($scheme:ty),* $(,)?) => {$(
        impl<T: Punnable> SchemeRead<T> for $scheme {
            #[inline]
            fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T {
                T::from_pun(<T::Pun as Primitive>::load(
                    atom.punned(),
                    std::sync::atomic::Ordering::Acquire,
                ))
            }

            #[inline]
            fn write<const NMUX: usize>(
                atom: &Atomic<T, Self, NMUX>,
                value: T,
            ) {
                <T::Pun as Primitive>::store(
                    atom.punned(),
                    value.to_pun(),
                    std::sync::atomic::Ordering::Release,
                );
            }
        }
    )*};
}

impl_punned_read!(StrongPun, WeakPun);

impl<T: Copy + 'static> SchemeRead<T> for Lock {
    fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T {
        let mutex = registry::mutex_for(atom.mutex_key());
        let _guard = mutex
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // SAFETY: serialized by the singleton mutex, as for apply.
        unsafe { atom.raw().read() }
    }

    fn write<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>, value: T) {
        let mutex = registry::mutex_for(atom.mutex_key());
        let _guard = mutex
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // SAFETY: serialized by the singleton mutex, as for apply.
        unsafe { atom.raw().write(value) }
    }
}

impl<T: Copy> SchemeRead<T> for Serial {
    #[inline]
    fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T {
        // SAFETY: serial cells are confined to one thread by !Sync.
        unsafe { atom.raw().read() }
    }

    #[inline]
    fn write<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>, value: T) {
        // SAFETY: as for read.
        unsafe { atom.raw().write(value) }
    }
}
