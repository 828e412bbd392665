/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Primitive Atomic Views
//!
//! Maps a value type onto the standard library atomic type that carries
//! its storage. Integers map onto their own atomic types, floats map onto
//! the same-width unsigned atomic through bit conversion (the same
//! technique as `AtomicF64` in the sibling `prism3-rust-atomic` crate),
//! and raw pointers map onto `AtomicPtr`.
//!
//! The compare-exchange schemes operate purely on these views; value
//! comparison is bit-pattern comparison, exactly as for the underlying
//! hardware primitive.
//!
//! # Author
//!
//! Haixing Hu

use std::marker::PhantomData;
use std::mem;
use std::sync::atomic::{
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicIsize,
    AtomicPtr,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicUsize,
    Ordering,
};

/// A value type with a standard library atomic counterpart.
///
/// # Safety
///
/// Implementations guarantee that `Self::Atom` stores exactly the bytes of
/// a `Self`: same size, and an alignment no stricter than required for the
/// atomic instruction. The cell accessors verify both properties again
/// with a compile-time [`LayoutCheck`] before reinterpreting storage.
///
/// # Author
///
/// Haixing Hu
pub unsafe trait Primitive: Copy {
    /// The standard library atomic type backing this value type.
    type Atom;

    /// Loads the value with the given ordering.
    fn load(atom: &Self::Atom, order: Ordering) -> Self;

    /// Stores a value with the given ordering.
    fn store(atom: &Self::Atom, value: Self, order: Ordering);

    /// Strong compare-exchange on the bit pattern of the value.
    ///
    /// # Returns
    ///
    /// `Ok(previous)` when the exchange took place, `Err(actual)` with the
    /// freshly observed value otherwise.
    fn compare_exchange(
        atom: &Self::Atom,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;

    /// Weak compare-exchange; may fail spuriously even on a match.
    fn compare_exchange_weak(
        atom: &Self::Atom,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

/// Compile-time guard for reinterpreting `*mut T` as `*const A`.
///
/// Referencing [`LayoutCheck::OK`] forces evaluation during
/// monomorphization; a size or alignment mismatch is a build failure, not
/// a run-time error.
pub(crate) struct LayoutCheck<T, A>(PhantomData<(T, A)>);

impl<T, A> LayoutCheck<T, A> {
    /// Evaluates to `()` when `A` can view the storage of a `T`.
    pub(crate) const OK: () = assert!(
        mem::size_of::<T>() == mem::size_of::<A>()
            && mem::align_of::<A>() <= mem::align_of::<T>(),
        "atomic view does not match the layout of the value type"
    );
}

/// Implements `Primitive` for an integer type over its own atomic.
macro_rules! impl_primitive_int {
    ($($value:ty => $atom:ty),* $(,)?) => {$(
        unsafe impl Primitive for $value {
            type Atom = $atom;

            #[inline]
            fn load(atom: &Self::Atom, order: Ordering) -> Self {
                atom.load(order)
            }

            #[inline]
            fn store(atom: &Self::Atom, value: Self, order: Ordering) {
                atom.store(value, order);
            }

            #[inline]
            fn compare_exchange(
                atom: &Self::Atom,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atom.compare_exchange(current, new, success, failure)
            }

            #[inline]
            fn compare_exchange_weak(
                atom: &Self::Atom,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atom.compare_exchange_weak(current, new, success, failure)
            }
        }
    )*};
}

impl_primitive_int! {
    i8 => AtomicI8,
    u8 => AtomicU8,
    i16 => AtomicI16,
    u16 => AtomicU16,
    i32 => AtomicI32,
    u32 => AtomicU32,
    i64 => AtomicI64,
    u64 => AtomicU64,
    isize => AtomicIsize,
    usize => AtomicUsize,
}

/// Implements `Primitive` for a float type over the same-width unsigned
/// atomic, converting through the exact bit pattern. NaN payloads and
/// signed zeros round-trip unchanged.
macro_rules! impl_primitive_float {
    ($($value:ty => $atom:ty),* $(,)?) => {$(
        unsafe impl Primitive for $value {
            type Atom = $atom;

            #[inline]
            fn load(atom: &Self::Atom, order: Ordering) -> Self {
                <$value>::from_bits(atom.load(order))
            }

            #[inline]
            fn store(atom: &Self::Atom, value: Self, order: Ordering) {
                atom.store(value.to_bits(), order);
            }

            #[inline]
            fn compare_exchange(
                atom: &Self::Atom,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atom.compare_exchange(
                    current.to_bits(),
                    new.to_bits(),
                    success,
                    failure,
                )
                .map(<$value>::from_bits)
                .map_err(<$value>::from_bits)
            }

            #[inline]
            fn compare_exchange_weak(
                atom: &Self::Atom,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atom.compare_exchange_weak(
                    current.to_bits(),
                    new.to_bits(),
                    success,
                    failure,
                )
                .map(<$value>::from_bits)
                .map_err(<$value>::from_bits)
            }
        }
    )*};
}

impl_primitive_float! {
    f32 => AtomicU32,
    f64 => AtomicU64,
}

unsafe impl<U> Primitive for *mut U {
    type Atom = AtomicPtr<U>;

    #[inline]
    fn load(atom: &Self::Atom, order: Ordering) -> Self {
        atom.load(order)
    }

    #[inline]
    fn store(atom: &Self::Atom, value: Self, order: Ordering) {
        atom.store(value, order);
    }

    #[inline]
    fn compare_exchange(
        atom: &Self::Atom,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        atom.compare_exchange(current, new, success, failure)
    }

    #[inline]
    fn compare_exchange_weak(
        atom: &Self::Atom,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        atom.compare_exchange_weak(current, new, success, failure)
    }
}
