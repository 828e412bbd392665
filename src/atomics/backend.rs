/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # External Backend Scheme
//!
//! Routes operations through a user-supplied performance-portability
//! backend instead of the standard library. The backend exposes one
//! fetch-and-apply primitive per (operation, value type) pair through the
//! per-operation traits below; a pair the backend does not implement is
//! unsupported for the [`External`] scheme and fails to compile, never at
//! run time.
//!
//! Compared to the native scheme the backend path covers more operations
//! (multiply, divide, remainder, shifts, min, max on floats) but fewer
//! types (no raw pointers — pointer operands do not convert), and it has
//! no memory-ordering parameter: the backend manages its own ordering
//! internally, so explicit orderings passed by the caller are ignored.
//!
//! # Author
//!
//! Haixing Hu

use std::marker::PhantomData;

use crate::atomics::atomic::Atomic;
use crate::atomics::ops::{
    self,
    Operation,
};
use crate::atomics::order::SyncOrder;
use crate::atomics::scheme::{
    ApplyOp,
    Scheme,
    SchemeRead,
    ThreadSafe,
};
use crate::atomics::sealed::Sealed;

/// The external-backend scheme, parameterized by the backend `B`.
///
/// `B` is never instantiated; it is a type-level router to the backend's
/// primitive set.
///
/// # Author
///
/// Haixing Hu
#[derive(Copy, Clone, Debug, Default)]
pub struct External<B>(PhantomData<fn() -> B>);

impl<B> Sealed for External<B> {}

impl<B: 'static> Scheme for External<B> {
    const NAME: &'static str = "external";
}

impl<B: 'static> ThreadSafe for External<B> {}

// Not `Lockless`: the backend may synchronize internally (a lock, say)
// in ways the std atomic instructions cannot observe, so interleaving
// backend primitives with the std compare-exchange schemes on one cell
// loses updates. `via` refuses the external scheme in both directions;
// callers who can prove their backend compiles down to plain same-width
// atomic instructions still have `via_unchecked`.

/// Declares one per-operation backend trait.
///
/// Each primitive atomically applies its operation to `*target` and
/// returns the value from *before* the update, the convention of every
/// fetch-style primitive.
macro_rules! backend_trait {
    ($(#[$doc:meta])* $trait_:ident, $method:ident, $operand:ty) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// Implementations must perform the whole read-modify-write as
        /// one atomic step with respect to every other backend primitive
        /// and volatile access on the same location, and must be sound
        /// for any valid, well-aligned `target` pointer. Nothing requires
        /// the step to be compatible with the standard library's atomic
        /// instructions; the external scheme never mixes the two on one
        /// cell.
        pub unsafe trait $trait_<T> {
            /// Atomically applies the operation, returning the old value.
            ///
            /// # Safety
            ///
            /// `target` must be valid, well-aligned, and reachable only
            /// through backend primitives for the duration of the call.
            unsafe fn $method(target: *mut T, value: $operand) -> T;
        }
    };
}

backend_trait!(
    /// Backend addition primitive.
    BackendAdd, fetch_add, T);
backend_trait!(
    /// Backend subtraction primitive.
    BackendSub, fetch_sub, T);
backend_trait!(
    /// Backend multiplication primitive.
    BackendMul, fetch_mul, T);
backend_trait!(
    /// Backend division primitive.
    BackendDiv, fetch_div, T);
backend_trait!(
    /// Backend remainder primitive.
    BackendRem, fetch_rem, T);
backend_trait!(
    /// Backend left-shift primitive. The shift count is `u32`, matching
    /// the asymmetric signature such backends use for shifts.
    BackendShl, fetch_shl, u32);
backend_trait!(
    /// Backend right-shift primitive.
    BackendShr, fetch_shr, u32);
backend_trait!(
    /// Backend bitwise-and primitive.
    BackendBitAnd, fetch_and, T);
backend_trait!(
    /// Backend bitwise-or primitive.
    BackendBitOr, fetch_or, T);
backend_trait!(
    /// Backend bitwise-xor primitive.
    BackendBitXor, fetch_xor, T);
backend_trait!(
    /// Backend minimum primitive.
    BackendMin, fetch_min, T);
backend_trait!(
    /// Backend maximum primitive.
    BackendMax, fetch_max, T);

/// Backend increment/decrement primitives.
///
/// These return nothing, which is why the inc/dec family on the external
/// scheme cannot report an exact pre- or post-operation value; see the
/// scheme-level documentation of the race.
///
/// # Safety
///
/// As for the fetch primitives: the update must be one atomic step, and
/// the pointer contract is the same.
pub unsafe trait BackendIncDec<T> {
    /// Atomically increments `*target` by one.
    ///
    /// # Safety
    ///
    /// `target` must be valid, well-aligned, and reachable only through
    /// backend primitives for the duration of the call.
    unsafe fn increment(target: *mut T);

    /// Atomically decrements `*target` by one.
    ///
    /// # Safety
    ///
    /// As for `increment`.
    unsafe fn decrement(target: *mut T);
}

/// Routes a binary descriptor to its backend trait. The contract value is
/// recomputed from the old value the primitive returns, so it is exact.
macro_rules! impl_external_binary {
    ($desc:ident, $trait_:ident, $method:ident, $operand:ty) => {
        impl<T, X, B> ApplyOp<T, ops::$desc<X>> for External<B>
        where
            T: Copy,
            X: Into<$operand> + Copy,
            ops::$desc<X>: Operation<T>,
            B: $trait_<T> + 'static,
        {
            #[inline]
            fn apply<const NMUX: usize>(
                atom: &Atomic<T, Self, NMUX>,
                op: &ops::$desc<X>,
                _sync: SyncOrder,
            ) -> T {
                // SAFETY: the cell owns its storage and the external
                // scheme touches it only through backend primitives.
                let old = unsafe { B::$method(atom.raw(), op.0.into()) };
                op.apply(old).ret
            }
        }
    };
}

impl_external_binary!(Add, BackendAdd, fetch_add, T);
impl_external_binary!(Sub, BackendSub, fetch_sub, T);
impl_external_binary!(Mul, BackendMul, fetch_mul, T);
impl_external_binary!(Div, BackendDiv, fetch_div, T);
impl_external_binary!(Rem, BackendRem, fetch_rem, T);
impl_external_binary!(Shl, BackendShl, fetch_shl, u32);
impl_external_binary!(Shr, BackendShr, fetch_shr, u32);
impl_external_binary!(BitAnd, BackendBitAnd, fetch_and, T);
impl_external_binary!(BitOr, BackendBitOr, fetch_or, T);
impl_external_binary!(BitXor, BackendBitXor, fetch_xor, T);
impl_external_binary!(Min, BackendMin, fetch_min, T);
impl_external_binary!(Max, BackendMax, fetch_max, T);

// The inc/dec family. The backend increment returns nothing, so the
// reported value comes from a second, volatile read outside the atomic
// region: before the update for the post forms, after it for the pre
// forms. Under contention another thread's update can slip between the
// two, so the returned value is best-effort only — a known approximation
// inherited from the backend's interface, not a correct read. The update
// itself is exact.

impl<T: Copy, B: BackendIncDec<T> + 'static> ApplyOp<T, ops::PreInc>
    for External<B>
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        _op: &ops::PreInc,
        _sync: SyncOrder,
    ) -> T {
        // SAFETY: backend primitive plus a racy-by-contract volatile read.
        unsafe {
            B::increment(atom.raw());
            atom.raw().read_volatile()
        }
    }
}

impl<T: Copy, B: BackendIncDec<T> + 'static> ApplyOp<T, ops::PostInc>
    for External<B>
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        _op: &ops::PostInc,
        _sync: SyncOrder,
    ) -> T {
        // SAFETY: as for PreInc, with the read taken before the update.
        unsafe {
            let before = atom.raw().read_volatile();
            B::increment(atom.raw());
            before
        }
    }
}

impl<T: Copy, B: BackendIncDec<T> + 'static> ApplyOp<T, ops::PreDec>
    for External<B>
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        _op: &ops::PreDec,
        _sync: SyncOrder,
    ) -> T {
        // SAFETY: as for PreInc.
        unsafe {
            B::decrement(atom.raw());
            atom.raw().read_volatile()
        }
    }
}

impl<T: Copy, B: BackendIncDec<T> + 'static> ApplyOp<T, ops::PostDec>
    for External<B>
{
    #[inline]
    fn apply<const NMUX: usize>(
        atom: &Atomic<T, Self, NMUX>,
        _op: &ops::PostDec,
        _sync: SyncOrder,
    ) -> T {
        // SAFETY: as for PostInc.
        unsafe {
            let before = atom.raw().read_volatile();
            B::decrement(atom.raw());
            before
        }
    }
}

/// The external scheme cannot be substituted for a std-atomic scheme on a
/// live cell, in either direction:
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, External, Strong};
///
/// struct SomeBackend;
///
/// let cell = Atomic::<i64, External<SomeBackend>>::new(0);
/// cell.via::<Strong>();
/// ```
///
/// ```compile_fail
/// use prism3_atomics::{Atomic, External, Strong};
///
/// struct SomeBackend;
///
/// let cell = Atomic::<i64, Strong>::new(0);
/// cell.via::<External<SomeBackend>>();
/// ```
#[cfg(doctest)]
pub struct ViaRejectsExternal;

impl<T: Copy, B: 'static> SchemeRead<T> for External<B> {
    #[inline]
    fn read<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>) -> T {
        // SAFETY: volatile snapshot; the backend owns the ordering story.
        unsafe { atom.raw().read_volatile() }
    }

    #[inline]
    fn write<const NMUX: usize>(atom: &Atomic<T, Self, NMUX>, value: T) {
        // SAFETY: as for read.
        unsafe { atom.raw().write_volatile(value) }
    }
}
