/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Entry-Point Macros
//!
//! Generates the per-operation entry points of [`Atomic`](crate::Atomic).
//! Every operation appears in three forms: the plain call (sequentially
//! consistent), a `*_order` form taking one memory ordering applied to
//! both compare-exchange paths, and a `*_orders` form taking an explicit
//! success/failure pair. Schemes that do not use orderings accept and
//! ignore them.
//!
//! # Author
//!
//! Haixing Hu

/// Generates the three entry points for a binary operation.
///
/// # Parameters
///
/// * `$fun` / `$fun_order` / `$fun_orders` - The method names.
/// * `$desc` - The operation descriptor in [`ops`](crate::ops).
/// * `$verb` - Doc text: what the operation does to the value.
/// * `$ret` - Doc text: which value is returned.
macro_rules! impl_binary_entry {
    ($fun:ident, $fun_order:ident, $fun_orders:ident, $desc:ident,
     $verb:expr, $ret:expr) => {
        #[doc = concat!("Atomically ", $verb, ".")]
        ///
        /// Runs under this cell's scheme with sequentially consistent
        /// ordering, matching the behavior of the plain standard library
        /// operators.
        ///
        /// # Parameters
        ///
        /// * `val` - The operand; any type convertible to the value type.
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun<X>(&self, val: X) -> T
        where
            S: ApplyOp<T, ops::$desc<X>>,
        {
            S::apply(self, &ops::$desc(val), SyncOrder::seq_cst())
        }

        #[doc = concat!("Atomically ", $verb, ", with an explicit memory ordering.")]
        ///
        /// The ordering is used for the operation itself; schemes built
        /// on compare-exchange derive the failure ordering by stripping
        /// any release component.
        ///
        /// # Parameters
        ///
        /// * `val` - The operand.
        /// * `sync` - Memory ordering for the operation.
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun_order<X>(&self, val: X, sync: Ordering) -> T
        where
            S: ApplyOp<T, ops::$desc<X>>,
        {
            S::apply(self, &ops::$desc(val), SyncOrder::from_single(sync))
        }

        #[doc = concat!("Atomically ", $verb, ", with explicit success and failure orderings.")]
        ///
        /// Only meaningful for the compare-exchange schemes; others use
        /// the success ordering or ignore the pair.
        ///
        /// # Parameters
        ///
        /// * `val` - The operand.
        /// * `success` - Ordering for the successful exchange.
        /// * `failure` - Ordering for the re-read of a failed exchange.
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun_orders<X>(
            &self,
            val: X,
            success: Ordering,
            failure: Ordering,
        ) -> T
        where
            S: ApplyOp<T, ops::$desc<X>>,
        {
            S::apply(self, &ops::$desc(val), SyncOrder::new(success, failure))
        }
    };
}

/// Generates the three entry points for an increment/decrement operation.
macro_rules! impl_prepost_entry {
    ($fun:ident, $fun_order:ident, $fun_orders:ident, $desc:ident,
     $verb:expr, $ret:expr) => {
        #[doc = concat!("Atomically ", $verb, ".")]
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun(&self) -> T
        where
            S: ApplyOp<T, ops::$desc>,
        {
            S::apply(self, &ops::$desc, SyncOrder::seq_cst())
        }

        #[doc = concat!("Atomically ", $verb, ", with an explicit memory ordering.")]
        ///
        /// # Parameters
        ///
        /// * `sync` - Memory ordering for the operation.
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun_order(&self, sync: Ordering) -> T
        where
            S: ApplyOp<T, ops::$desc>,
        {
            S::apply(self, &ops::$desc, SyncOrder::from_single(sync))
        }

        #[doc = concat!("Atomically ", $verb, ", with explicit success and failure orderings.")]
        ///
        /// # Parameters
        ///
        /// * `success` - Ordering for the successful exchange.
        /// * `failure` - Ordering for the re-read of a failed exchange.
        ///
        /// # Returns
        ///
        #[doc = concat!("", $ret, ".")]
        #[inline]
        pub fn $fun_orders(&self, success: Ordering, failure: Ordering) -> T
        where
            S: ApplyOp<T, ops::$desc>,
        {
            S::apply(self, &ops::$desc, SyncOrder::new(success, failure))
        }
    };
}
