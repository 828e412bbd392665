/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Operation Descriptors
//!
//! One descriptor per supported operation. A descriptor computes the new
//! value from the old value and its operand, and reports the value the
//! operation returns to the caller: the new value for every operation
//! except the post-increment/post-decrement pair, which return the value
//! from before the update.
//!
//! Which descriptor applies to which value type is the capability matrix
//! of the crate, expressed as trait implementations: integers carry the
//! full set, floats drop the remainder/shift/bitwise group, raw pointers
//! keep offset arithmetic and address min/max, and everything else is a
//! missing impl and therefore a build failure.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

use crate::atomics::primitive::Primitive;

/// Result of applying an operation descriptor to an old value.
///
/// # Author
///
/// Haixing Hu
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Update<T> {
    /// The value to store.
    pub new: T,
    /// The value reported to the caller.
    pub ret: T,
}

/// An atomic read-modify-write operation on values of type `T`.
///
/// Descriptors are pure: `apply` may run many times inside a
/// compare-exchange retry loop, once per iteration, and only the
/// succeeding iteration's result is published and returned.
///
/// # Author
///
/// Haixing Hu
pub trait Operation<T> {
    /// Computes the stored and returned values from the old value.
    fn apply(&self, old: T) -> Update<T>;
}

/// An operation with a single-instruction route on the native scheme.
///
/// Standard library fetch primitives return the value from *before* the
/// call; implementations recompute the contract value from that old value
/// rather than re-reading the cell, so the result is exact even under
/// contention.
///
/// # Author
///
/// Haixing Hu
pub trait NativeOp<T: Primitive>: Operation<T> {
    /// Performs the operation with one native primitive call.
    ///
    /// # Parameters
    ///
    /// * `atom` - The native atomic view of the cell.
    /// * `order` - Memory ordering for the primitive.
    ///
    /// # Returns
    ///
    /// The operation's contract value (new value, or old value for the
    /// post-increment/post-decrement family).
    fn apply_native(&self, atom: &T::Atom, order: Ordering) -> T;
}

/// Addition: `value += operand`.
#[derive(Copy, Clone, Debug)]
pub struct Add<X>(
    /// The operand.
    pub X,
);

/// Subtraction: `value -= operand`.
#[derive(Copy, Clone, Debug)]
pub struct Sub<X>(
    /// The operand.
    pub X,
);

/// Multiplication: `value *= operand`.
#[derive(Copy, Clone, Debug)]
pub struct Mul<X>(
    /// The operand.
    pub X,
);

/// Division: `value /= operand`. Division by zero carries the scalar
/// type's own fatal or IEEE behavior; the schemes neither catch nor
/// translate it.
#[derive(Copy, Clone, Debug)]
pub struct Div<X>(
    /// The operand.
    pub X,
);

/// Remainder: `value %= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct Rem<X>(
    /// The operand.
    pub X,
);

/// Left shift: `value <<= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct Shl<X>(
    /// The operand.
    pub X,
);

/// Right shift: `value >>= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct Shr<X>(
    /// The operand.
    pub X,
);

/// Bitwise and: `value &= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct BitAnd<X>(
    /// The operand.
    pub X,
);

/// Bitwise or: `value |= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct BitOr<X>(
    /// The operand.
    pub X,
);

/// Bitwise xor: `value ^= operand`. Integers only.
#[derive(Copy, Clone, Debug)]
pub struct BitXor<X>(
    /// The operand.
    pub X,
);

/// Minimum: replaces the value with the operand when the operand is
/// smaller. Defined by direct comparison rather than a library `min`, so
/// any operand type that converts into `T` works.
#[derive(Copy, Clone, Debug)]
pub struct Min<X>(
    /// The operand.
    pub X,
);

/// Maximum: replaces the value with the operand when the operand is
/// larger.
#[derive(Copy, Clone, Debug)]
pub struct Max<X>(
    /// The operand.
    pub X,
);

/// Pre-increment: `++value`, returning the new value.
#[derive(Copy, Clone, Debug, Default)]
pub struct PreInc;

/// Post-increment: `value++`, returning the old value.
#[derive(Copy, Clone, Debug, Default)]
pub struct PostInc;

/// Pre-decrement: `--value`, returning the new value.
#[derive(Copy, Clone, Debug, Default)]
pub struct PreDec;

/// Post-decrement: `value--`, returning the old value.
#[derive(Copy, Clone, Debug, Default)]
pub struct PostDec;

/// Arbitrary update through a caller-supplied function, returning the new
/// value. The function must be pure for the same reason `Operation::apply`
/// must be: a retry loop may call it several times.
#[derive(Copy, Clone)]
pub struct ApplyFn<F>(
    /// The update function.
    pub F,
);

impl<T, X> Operation<T> for Min<X>
where
    T: Copy + PartialOrd,
    X: Into<T> + Copy,
{
    #[inline]
    fn apply(&self, old: T) -> Update<T> {
        let operand: T = self.0.into();
        let new = if operand < old { operand } else { old };
        Update { new, ret: new }
    }
}

impl<T, X> Operation<T> for Max<X>
where
    T: Copy + PartialOrd,
    X: Into<T> + Copy,
{
    #[inline]
    fn apply(&self, old: T) -> Update<T> {
        let operand: T = self.0.into();
        let new = if old < operand { operand } else { old };
        Update { new, ret: new }
    }
}

impl<T, F> Operation<T> for ApplyFn<F>
where
    T: Copy,
    F: Fn(T) -> T,
{
    #[inline]
    fn apply(&self, old: T) -> Update<T> {
        let new = (self.0)(old);
        Update { new, ret: new }
    }
}

/// Shorthand for a binary descriptor impl body.
macro_rules! binary_impl {
    ($desc:ident, $t:ty, $operand:ty, $old:ident, $x:ident, $new:expr) => {
        impl<X: Into<$operand> + Copy> Operation<$t> for $desc<X> {
            #[inline]
            fn apply(&self, $old: $t) -> Update<$t> {
                let $x: $operand = self.0.into();
                let new = $new;
                Update { new, ret: new }
            }
        }
    };
}

/// The full integer operation set.
///
/// Additive and multiplicative arithmetic wraps, matching the standard
/// library's `fetch_add`/`fetch_sub` primitives so every scheme computes
/// the same final value. Division, remainder and shifts keep the scalar
/// type's own overflow behavior.
macro_rules! impl_int_ops {
    ($($t:ty),* $(,)?) => {$(
        binary_impl!(Add, $t, $t, old, x, old.wrapping_add(x));
        binary_impl!(Sub, $t, $t, old, x, old.wrapping_sub(x));
        binary_impl!(Mul, $t, $t, old, x, old.wrapping_mul(x));
        binary_impl!(Div, $t, $t, old, x, old / x);
        binary_impl!(Rem, $t, $t, old, x, old % x);
        binary_impl!(Shl, $t, u32, old, x, old << x);
        binary_impl!(Shr, $t, u32, old, x, old >> x);
        binary_impl!(BitAnd, $t, $t, old, x, old & x);
        binary_impl!(BitOr, $t, $t, old, x, old | x);
        binary_impl!(BitXor, $t, $t, old, x, old ^ x);

        impl Operation<$t> for PreInc {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                let new = old.wrapping_add(1);
                Update { new, ret: new }
            }
        }

        impl Operation<$t> for PostInc {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                Update { new: old.wrapping_add(1), ret: old }
            }
        }

        impl Operation<$t> for PreDec {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                let new = old.wrapping_sub(1);
                Update { new, ret: new }
            }
        }

        impl Operation<$t> for PostDec {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                Update { new: old.wrapping_sub(1), ret: old }
            }
        }
    )*};
}

impl_int_ops!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

/// The float operation set: arithmetic, min/max and the inc/dec family.
/// No remainder, shifts or bitwise operations.
macro_rules! impl_float_ops {
    ($($t:ty),* $(,)?) => {$(
        binary_impl!(Add, $t, $t, old, x, old + x);
        binary_impl!(Sub, $t, $t, old, x, old - x);
        binary_impl!(Mul, $t, $t, old, x, old * x);
        binary_impl!(Div, $t, $t, old, x, old / x);

        impl Operation<$t> for PreInc {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                let new = old + 1.0;
                Update { new, ret: new }
            }
        }

        impl Operation<$t> for PostInc {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                Update { new: old + 1.0, ret: old }
            }
        }

        impl Operation<$t> for PreDec {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                let new = old - 1.0;
                Update { new, ret: new }
            }
        }

        impl Operation<$t> for PostDec {
            #[inline]
            fn apply(&self, old: $t) -> Update<$t> {
                Update { new: old - 1.0, ret: old }
            }
        }
    )*};
}

impl_float_ops!(f32, f64);

// Raw pointers: offset arithmetic in units of the pointee, as for the
// language's own pointer arithmetic. Wrapping, since the cell cannot know
// the provenance of the values passing through it.

impl<U> Operation<*mut U> for Add<usize> {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        let new = old.wrapping_add(self.0);
        Update { new, ret: new }
    }
}

impl<U> Operation<*mut U> for Sub<usize> {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        let new = old.wrapping_sub(self.0);
        Update { new, ret: new }
    }
}

impl<U> Operation<*mut U> for PreInc {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        let new = old.wrapping_add(1);
        Update { new, ret: new }
    }
}

impl<U> Operation<*mut U> for PostInc {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        Update { new: old.wrapping_add(1), ret: old }
    }
}

impl<U> Operation<*mut U> for PreDec {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        let new = old.wrapping_sub(1);
        Update { new, ret: new }
    }
}

impl<U> Operation<*mut U> for PostDec {
    #[inline]
    fn apply(&self, old: *mut U) -> Update<*mut U> {
        Update { new: old.wrapping_sub(1), ret: old }
    }
}

/// Native routes for the integer types: the operations the standard
/// library exposes as single fetch primitives, including `fetch_min` and
/// `fetch_max`. Multiplication, division, remainder and shifts have no
/// primitive and stay CAS-only.
macro_rules! impl_int_native {
    ($($t:ty),* $(,)?) => {$(
        impl<X: Into<$t> + Copy> NativeOp<$t> for Add<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                atom.fetch_add(x, order).wrapping_add(x)
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for Sub<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                atom.fetch_sub(x, order).wrapping_sub(x)
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for BitAnd<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                atom.fetch_and(x, order) & x
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for BitOr<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                atom.fetch_or(x, order) | x
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for BitXor<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                atom.fetch_xor(x, order) ^ x
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for Min<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                let old = atom.fetch_min(x, order);
                if x < old { x } else { old }
            }
        }

        impl<X: Into<$t> + Copy> NativeOp<$t> for Max<X> {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                let x: $t = self.0.into();
                let old = atom.fetch_max(x, order);
                if old < x { x } else { old }
            }
        }

        impl NativeOp<$t> for PreInc {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                atom.fetch_add(1, order).wrapping_add(1)
            }
        }

        impl NativeOp<$t> for PostInc {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                atom.fetch_add(1, order)
            }
        }

        impl NativeOp<$t> for PreDec {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                atom.fetch_sub(1, order).wrapping_sub(1)
            }
        }

        impl NativeOp<$t> for PostDec {
            #[inline]
            fn apply_native(
                &self,
                atom: &<$t as Primitive>::Atom,
                order: Ordering,
            ) -> $t {
                atom.fetch_sub(1, order)
            }
        }
    )*};
}

impl_int_native!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
