/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Type Punning
//!
//! The punned schemes route every update of a value through the
//! compare-exchange instruction of a same-sized unsigned integer, which on
//! some targets is cheaper than the exchange the value type would
//! otherwise get. The reinterpretation never leaks to callers: operation
//! descriptors always see the real value type, and only the final
//! exchange runs on the punned view.
//!
//! The stand-in is chosen from the fixed ladder `u8`, `u16`, `u32`,
//! `u64`, `usize` and must match the value's size exactly; the cell
//! accessors enforce size and alignment at compile time.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomics::primitive::Primitive;
use crate::atomics::sealed::Sealed;

/// An unsigned integer usable as a punning stand-in.
///
/// Closed ladder: `u8`, `u16`, `u32`, `u64`, `usize`. Sealed because the
/// punned schemes rely on these being exactly the types with a same-sized,
/// same-aligned standard library atomic.
pub trait PunPrim: Primitive + Sealed {}

impl Sealed for u8 {}
impl Sealed for u16 {}
impl Sealed for u32 {}
impl Sealed for u64 {}
impl Sealed for usize {}

impl PunPrim for u8 {}
impl PunPrim for u16 {}
impl PunPrim for u32 {}
impl PunPrim for u64 {}
impl PunPrim for usize {}

/// A value type that can be bit-reinterpreted as an unsigned integer of
/// the same size.
///
/// Required by the [`StrongPun`](crate::StrongPun) and
/// [`WeakPun`](crate::WeakPun) schemes. Implementations exist for every
/// primitive integer, float and raw pointer type; for user-defined
/// trivially copyable aggregates, use [`impl_punnable!`](crate::impl_punnable)
/// with a `zerocopy`-derived type.
///
/// # Safety
///
/// `to_pun` and `from_pun` must be exact, lossless reinterpretations of
/// the value's bytes, and `size_of::<Self>() == size_of::<Self::Pun>()`
/// must hold. The punned cell view additionally requires
/// `align_of::<Self>() >= align_of::<Self::Pun>()`; both properties are
/// re-checked at compile time when a punned scheme is instantiated, so a
/// faulty implementation fails the build rather than corrupting memory.
///
/// # Author
///
/// Haixing Hu
pub unsafe trait Punnable: Copy {
    /// The same-sized unsigned stand-in carrying this value's bytes.
    type Pun: PunPrim;

    /// Reinterprets the value's bytes as the stand-in.
    fn to_pun(self) -> Self::Pun;

    /// Reinterprets the stand-in's bytes back into a value.
    fn from_pun(pun: Self::Pun) -> Self;
}

/// Punnable integers: a plain lossless cast in both directions.
macro_rules! impl_punnable_int {
    ($($value:ty => $pun:ty),* $(,)?) => {$(
        unsafe impl Punnable for $value {
            type Pun = $pun;

            #[inline]
            fn to_pun(self) -> Self::Pun {
                self as $pun
            }

            #[inline]
            fn from_pun(pun: Self::Pun) -> Self {
                pun as $value
            }
        }
    )*};
}

impl_punnable_int! {
    i8 => u8,
    u8 => u8,
    i16 => u16,
    u16 => u16,
    i32 => u32,
    u32 => u32,
    i64 => u64,
    u64 => u64,
    isize => usize,
    usize => usize,
}

/// Punnable floats: exact bit-pattern conversion.
macro_rules! impl_punnable_float {
    ($($value:ty => $pun:ty),* $(,)?) => {$(
        unsafe impl Punnable for $value {
            type Pun = $pun;

            #[inline]
            fn to_pun(self) -> Self::Pun {
                self.to_bits()
            }

            #[inline]
            fn from_pun(pun: Self::Pun) -> Self {
                <$value>::from_bits(pun)
            }
        }
    )*};
}

impl_punnable_float! {
    f32 => u32,
    f64 => u64,
}

unsafe impl<U> Punnable for *mut U {
    type Pun = usize;

    #[inline]
    fn to_pun(self) -> Self::Pun {
        self as usize
    }

    #[inline]
    fn from_pun(pun: Self::Pun) -> Self {
        pun as *mut U
    }
}

/// Implements [`Punnable`] for a user-defined trivially copyable type.
///
/// The type must implement `zerocopy::AsBytes` and `zerocopy::FromBytes`
/// (normally by derive), which is what makes the reinterpretation sound:
/// no padding bytes, and every bit pattern of the stand-in is a valid
/// value. The stand-in must come from the `PunPrim` ladder and match the
/// type's size; a mismatch fails to compile inside `zerocopy::transmute!`.
///
/// Note that the punned schemes also require
/// `align_of::<T>() >= align_of::<Pun>()`. A `#[repr(C)]` aggregate of
/// small fields usually needs an explicit `align` attribute to satisfy
/// this, e.g. `#[repr(C, align(4))]` for a pair of `u16`s punned as `u32`.
///
/// # Example
///
/// ```rust,ignore
/// use zerocopy::{AsBytes, FromBytes, FromZeroes};
///
/// #[derive(Clone, Copy, AsBytes, FromBytes, FromZeroes)]
/// #[repr(C, align(4))]
/// struct Rgba {
///     r: u8,
///     g: u8,
///     b: u8,
///     a: u8,
/// }
///
/// prism3_atomics::impl_punnable!(Rgba => u32);
/// ```
#[macro_export]
macro_rules! impl_punnable {
    ($value:ty => $pun:ty) => {
        unsafe impl $crate::Punnable for $value {
            type Pun = $pun;

            #[inline]
            fn to_pun(self) -> $pun {
                $crate::zerocopy::transmute!(self)
            }

            #[inline]
            fn from_pun(pun: $pun) -> Self {
                $crate::zerocopy::transmute!(pun)
            }
        }
    };
}
