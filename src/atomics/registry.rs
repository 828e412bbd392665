/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Mutex Registry
//!
//! Process-wide table of singleton mutexes for the [`Lock`](crate::Lock)
//! scheme: exactly one mutex per distinct (value type, scheme, partition)
//! key, created lazily on first use and alive until the process exits.
//! There is no eviction.
//!
//! The partition index ("NMUX") lets callers deliberately split logically
//! distinct atomics that happen to share a value type across several
//! mutexes, trading table size for reduced contention.
//!
//! # Author
//!
//! Haixing Hu

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{
    Mutex,
    OnceLock,
};

use crossbeam_utils::CachePadded;

/// Identifies one singleton mutex.
///
/// For a given key there is exactly one mutex for the life of the process.
/// Every accessor of a shared lock-scheme cell must reach it through the
/// same key, or the mutex protects nothing; this is a documented caller
/// obligation, not something the registry can check.
///
/// # Author
///
/// Haixing Hu
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MutexKey {
    value: TypeId,
    scheme: TypeId,
    nmux: usize,
}

impl MutexKey {
    /// Builds the key for value type `T` under scheme `S` and the given
    /// partition index.
    #[inline]
    pub fn new<T: 'static, S: 'static>(nmux: usize) -> Self {
        Self {
            value: TypeId::of::<T>(),
            scheme: TypeId::of::<S>(),
            nmux,
        }
    }
}

/// Lazily initialized key-to-mutex table. The entries are leaked so they
/// can be handed out as `&'static`; they are singletons with process
/// lifetime, so this is not a leak in the resource sense.
static REGISTRY: OnceLock<
    Mutex<HashMap<MutexKey, &'static CachePadded<Mutex<()>>>>,
> = OnceLock::new();

/// Returns the singleton mutex for a key, creating it on first use.
///
/// Safe to call concurrently: the creation race is settled by the
/// registry's own interior lock, and every caller observes the same
/// mutex for the same key afterwards. The returned mutex lives for the
/// rest of the process.
///
/// # Parameters
///
/// * `key` - The (value type, scheme, partition) identity.
///
/// # Returns
///
/// A reference to the one mutex associated with `key`.
pub fn mutex_for(key: MutexKey) -> &'static Mutex<()> {
    let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
    // A poisoned table lock only means another thread panicked while
    // inserting; the map itself is still consistent.
    let mut table = registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let entry: &'static CachePadded<Mutex<()>> = *table
        .entry(key)
        .or_insert_with(|| Box::leak(Box::new(CachePadded::new(Mutex::new(())))));
    entry
}
