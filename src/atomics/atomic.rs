/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # The Atomic Cell
//!
//! The public-facing container: one value of a trivially copyable type,
//! updated atomically by whichever [scheme](crate::atomics::scheme) the
//! cell was instantiated with. Every operation the capability matrix
//! allows for the (type, scheme) pair is available as a method; anything
//! outside the matrix simply does not compile.
//!
//! # Author
//!
//! Haixing Hu

use std::cell::UnsafeCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::Ordering;

use crate::atomics::ops;
use crate::atomics::order::SyncOrder;
use crate::atomics::primitive::{
    LayoutCheck,
    Primitive,
};
use crate::atomics::pun::Punnable;
use crate::atomics::registry::MutexKey;
use crate::atomics::scheme::{
    ApplyOp,
    Lockless,
    Scheme,
    SchemeRead,
    Strong,
    ThreadSafe,
};

/// An atomic value of type `T`, synchronized by scheme `S`.
///
/// Owns exactly one `T` (which must be `Copy` — the Rust rendition of
/// trivially copyable; punning and raw compare-exchange both depend on
/// it). The scheme is chosen once, at the type level, for the lifetime of
/// the cell; [`via`](Self::via) substitutes another lock-free scheme for
/// a single call. `NMUX` is the mutex partition index, meaningful only
/// under the [`Lock`](crate::Lock) scheme.
///
/// Cells are deliberately neither `Clone` nor `Copy`: an atomic variable
/// is a place, not a value, and duplicating it silently would decouple
/// the threads that believe they share it.
///
/// # Example
///
/// ```rust
/// use prism3_atomics::Atomic;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(Atomic::<i64>::new(0));
/// let mut handles = vec![];
///
/// for _ in 0..10 {
///     let counter = counter.clone();
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             counter.add(1);
///         }
///     }));
/// }
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(counter.load(), 10_000);
/// ```
///
/// # Author
///
/// Haixing Hu
#[repr(transparent)]
pub struct Atomic<T, S = Strong, const NMUX: usize = 0> {
    value: UnsafeCell<T>,
    scheme: PhantomData<S>,
}

// SAFETY: sharing is sound exactly when the scheme synchronizes every
// access; Serial does not implement ThreadSafe and its cells stay
// confined to one thread.
unsafe impl<T: Send, S: ThreadSafe, const NMUX: usize> Sync
    for Atomic<T, S, NMUX>
{
}

impl<T, S, const NMUX: usize> Atomic<T, S, NMUX> {
    /// Creates a new atomic cell holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value: UnsafeCell::new(value),
            scheme: PhantomData,
        }
    }

    /// Consumes the cell and returns the contained value.
    ///
    /// Takes `self` by value, so no other reference can exist and no
    /// synchronization is needed.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Raw pointer to the cell's storage, for the lock and serial paths.
    #[inline]
    pub(crate) fn raw(&self) -> *mut T {
        self.value.get()
    }

    /// The standard library atomic view of the storage.
    ///
    /// The layout check runs at compile time; on targets where the atomic
    /// type is more aligned than the value type (e.g. 64-bit atomics on
    /// some 32-bit targets) the build fails instead of misreading memory.
    #[inline]
    pub(crate) fn native(&self) -> &T::Atom
    where
        T: Primitive,
    {
        let () = LayoutCheck::<T, T::Atom>::OK;
        // SAFETY: size and alignment verified above; the view aliases
        // the cell's own storage and all access goes through atomics.
        unsafe { &*(self.value.get() as *const T::Atom) }
    }

    /// The punned integral atomic view of the storage.
    #[inline]
    pub(crate) fn punned(&self) -> &<<T as Punnable>::Pun as Primitive>::Atom
    where
        T: Punnable,
    {
        let () =
            LayoutCheck::<T, <<T as Punnable>::Pun as Primitive>::Atom>::OK;
        // SAFETY: size and alignment verified above; Punnable guarantees
        // the stand-in carries exactly the value's bytes.
        unsafe {
            &*(self.value.get()
                as *const <<T as Punnable>::Pun as Primitive>::Atom)
        }
    }

    /// The mutex registry key for this cell.
    #[inline]
    pub(crate) fn mutex_key(&self) -> MutexKey
    where
        T: 'static,
        S: 'static,
    {
        MutexKey::new::<T, S>(NMUX)
    }

    /// Reborrows the cell under another lock-free scheme, for a single
    /// call or a whole call site.
    ///
    /// This is the per-call scheme override: `cell.via::<Weak>().add(1)`
    /// runs one addition under the weak loop regardless of the cell's
    /// own scheme. Restricted to [`Lockless`] schemes on both sides —
    /// those touch the storage exclusively through same-width atomic
    /// instructions and can therefore interleave freely.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomics::{Atomic, Weak};
    ///
    /// let cell = Atomic::<u32>::new(10);
    /// cell.add(10u32);
    /// cell.via::<Weak>().add(20u32);
    /// assert_eq!(cell.load(), 40);
    /// ```
    #[inline]
    pub fn via<S2>(&self) -> &Atomic<T, S2, NMUX>
    where
        S: Lockless,
        S2: Lockless,
    {
        // SAFETY: repr(transparent) over the same storage; the scheme
        // tag is phantom, and both schemes are restricted to atomic
        // instruction access.
        unsafe { &*(self as *const Self as *const Atomic<T, S2, NMUX>) }
    }

    /// Reborrows the cell under an arbitrary scheme, without the
    /// lock-free compatibility check.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that no access under the new scheme can
    /// race an access under any other scheme on this cell. In particular,
    /// reborrowing as [`Serial`](crate::Serial) requires that all
    /// concurrent access to the cell is externally serialized for the
    /// duration of use, and mixing [`Lock`](crate::Lock) with any
    /// lock-free scheme is never safe while both are in use.
    #[inline]
    pub unsafe fn via_unchecked<S2: Scheme>(&self) -> &Atomic<T, S2, NMUX> {
        // SAFETY: layout as for via(); the race freedom obligation is
        // the caller's.
        unsafe { &*(self as *const Self as *const Atomic<T, S2, NMUX>) }
    }
}

impl<T, S, const NMUX: usize> Atomic<T, S, NMUX>
where
    S: Scheme,
{
    /// Reads the current value through the scheme's synchronized path.
    ///
    /// # Returns
    ///
    /// The current value.
    #[inline]
    pub fn load(&self) -> T
    where
        S: SchemeRead<T>,
    {
        S::read(self)
    }

    /// Replaces the current value through the scheme's synchronized path.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to store.
    #[inline]
    pub fn store(&self, value: T)
    where
        S: SchemeRead<T>,
    {
        S::write(self, value)
    }

    impl_binary_entry!(add, add_order, add_orders, Add,
        "adds the operand to the value", "The new value");
    impl_binary_entry!(sub, sub_order, sub_orders, Sub,
        "subtracts the operand from the value", "The new value");
    impl_binary_entry!(mul, mul_order, mul_orders, Mul,
        "multiplies the value by the operand", "The new value");
    impl_binary_entry!(div, div_order, div_orders, Div,
        "divides the value by the operand", "The new value");
    impl_binary_entry!(rem, rem_order, rem_orders, Rem,
        "replaces the value with its remainder by the operand",
        "The new value");
    impl_binary_entry!(shl, shl_order, shl_orders, Shl,
        "shifts the value left by the operand", "The new value");
    impl_binary_entry!(shr, shr_order, shr_orders, Shr,
        "shifts the value right by the operand", "The new value");
    impl_binary_entry!(bitand, bitand_order, bitand_orders, BitAnd,
        "replaces the value with its bitwise and with the operand",
        "The new value");
    impl_binary_entry!(bitor, bitor_order, bitor_orders, BitOr,
        "replaces the value with its bitwise or with the operand",
        "The new value");
    impl_binary_entry!(bitxor, bitxor_order, bitxor_orders, BitXor,
        "replaces the value with its bitwise xor with the operand",
        "The new value");
    impl_binary_entry!(min, min_order, min_orders, Min,
        "replaces the value with the operand when the operand is smaller",
        "The new value");
    impl_binary_entry!(max, max_order, max_orders, Max,
        "replaces the value with the operand when the operand is larger",
        "The new value");

    impl_prepost_entry!(inc, inc_order, inc_orders, PreInc,
        "increments the value (alias of `preinc`)", "The new value");
    impl_prepost_entry!(preinc, preinc_order, preinc_orders, PreInc,
        "increments the value", "The new value");
    impl_prepost_entry!(postinc, postinc_order, postinc_orders, PostInc,
        "increments the value", "The value from before the increment");
    impl_prepost_entry!(dec, dec_order, dec_orders, PreDec,
        "decrements the value (alias of `predec`)", "The new value");
    impl_prepost_entry!(predec, predec_order, predec_orders, PreDec,
        "decrements the value", "The new value");
    impl_prepost_entry!(postdec, postdec_order, postdec_orders, PostDec,
        "decrements the value", "The value from before the decrement");

    /// Atomically replaces the value with `f(value)`, returning the new
    /// value.
    ///
    /// Under a compare-exchange scheme `f` may run once per retry
    /// iteration, so it must be pure.
    ///
    /// # Parameters
    ///
    /// * `f` - A function from the current value to the new value.
    ///
    /// # Returns
    ///
    /// The new value.
    #[inline]
    pub fn update<F>(&self, f: F) -> T
    where
        F: Fn(T) -> T,
        S: ApplyOp<T, ops::ApplyFn<F>>,
    {
        S::apply(self, &ops::ApplyFn(f), SyncOrder::seq_cst())
    }

    /// Atomically replaces the value with `f(value)`, with an explicit
    /// memory ordering.
    ///
    /// # Parameters
    ///
    /// * `f` - A function from the current value to the new value.
    /// * `sync` - Memory ordering for the operation.
    ///
    /// # Returns
    ///
    /// The new value.
    #[inline]
    pub fn update_order<F>(&self, f: F, sync: Ordering) -> T
    where
        F: Fn(T) -> T,
        S: ApplyOp<T, ops::ApplyFn<F>>,
    {
        S::apply(self, &ops::ApplyFn(f), SyncOrder::from_single(sync))
    }

    /// Atomically replaces the value with `f(value)`, with explicit
    /// success and failure orderings.
    ///
    /// # Parameters
    ///
    /// * `f` - A function from the current value to the new value.
    /// * `success` - Ordering for the successful exchange.
    /// * `failure` - Ordering for the re-read of a failed exchange.
    ///
    /// # Returns
    ///
    /// The new value.
    #[inline]
    pub fn update_orders<F>(
        &self,
        f: F,
        success: Ordering,
        failure: Ordering,
    ) -> T
    where
        F: Fn(T) -> T,
        S: ApplyOp<T, ops::ApplyFn<F>>,
    {
        S::apply(self, &ops::ApplyFn(f), SyncOrder::new(success, failure))
    }
}

impl<T, S, const NMUX: usize> From<T> for Atomic<T, S, NMUX> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Default, S, const NMUX: usize> Default for Atomic<T, S, NMUX> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, S, const NMUX: usize> fmt::Debug for Atomic<T, S, NMUX>
where
    T: fmt::Debug,
    S: SchemeRead<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atomic")
            .field("value", &self.load())
            .field("scheme", &S::NAME)
            .field("nmux", &NMUX)
            .finish()
    }
}

impl<T, S, const NMUX: usize> fmt::Display for Atomic<T, S, NMUX>
where
    T: fmt::Display,
    S: SchemeRead<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.load())
    }
}
