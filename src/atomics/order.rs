/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Memory Ordering Plumbing
//!
//! Carries the caller's memory-ordering choice through the scheme
//! strategies. A caller may give no ordering (sequential consistency, as
//! for the C++ `std::atomic` defaults), a single ordering used for both
//! the success and failure paths of a compare-exchange, or an explicit
//! success/failure pair.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

/// The success/failure ordering pair threaded through every scheme.
///
/// Schemes that perform a compare-exchange use both fields; schemes that
/// perform a single primitive call use only `success`; the lock and serial
/// schemes ignore the pair entirely.
///
/// # Author
///
/// Haixing Hu
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SyncOrder {
    /// Ordering applied when the update takes effect.
    pub success: Ordering,
    /// Ordering applied to the re-read performed by a failed
    /// compare-exchange.
    pub failure: Ordering,
}

impl SyncOrder {
    /// Sequentially consistent on both paths.
    ///
    /// This is the default for every operation entry point without an
    /// explicit ordering argument.
    #[inline]
    pub const fn seq_cst() -> Self {
        Self {
            success: Ordering::SeqCst,
            failure: Ordering::SeqCst,
        }
    }

    /// Builds a pair from a single ordering.
    ///
    /// The failure ordering is the given ordering with any release
    /// component stripped, since a failed compare-exchange performs no
    /// store.
    ///
    /// # Parameters
    ///
    /// * `sync` - The ordering for the operation.
    #[inline]
    pub fn from_single(sync: Ordering) -> Self {
        Self {
            success: sync,
            failure: strip_release(sync),
        }
    }

    /// Builds a pair from explicit success and failure orderings.
    ///
    /// # Parameters
    ///
    /// * `success` - Ordering for the successful exchange.
    /// * `failure` - Ordering for the re-read of a failed exchange. Must
    ///   not contain a release component, per the standard library's
    ///   compare-exchange contract.
    #[inline]
    pub const fn new(success: Ordering, failure: Ordering) -> Self {
        Self { success, failure }
    }
}

impl Default for SyncOrder {
    #[inline]
    fn default() -> Self {
        Self::seq_cst()
    }
}

/// Maps an ordering to a legal compare-exchange failure ordering.
///
/// `Release` becomes `Relaxed` and `AcqRel` becomes `Acquire`; everything
/// else passes through unchanged.
#[inline]
pub(crate) fn strip_release(sync: Ordering) -> Ordering {
    match sync {
        Ordering::Release => Ordering::Relaxed,
        Ordering::AcqRel => Ordering::Acquire,
        other => other,
    }
}
