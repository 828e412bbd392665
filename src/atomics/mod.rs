/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Scheme-Parameterized Atomics
//!
//! A generic atomic cell, [`Atomic<T, S, NMUX>`](Atomic), whose atomicity
//! strategy is chosen by the scheme parameter `S` rather than baked into
//! the type. All schemes agree on the user-facing contract of every
//! operation; they differ only in mechanism and in which (value type,
//! operation) pairs they support. Unsupported combinations are missing
//! trait impls and fail at compile time.
//!
//! # Features
//!
//! - One cell type across integers, floats, raw pointers, and punnable
//!   user aggregates
//! - Interchangeable schemes: native fetch primitives, strong/weak
//!   compare-exchange loops (plain and bit-punned), a singleton-mutex
//!   scheme, and an unsynchronized serial scheme
//! - Per-call scheme override between lockless schemes via
//!   [`Atomic::via`]
//! - Explicit memory-ordering variants of every operation
//!
//! # Author
//!
//! Haixing Hu

#[macro_use]
mod atomic_entry_macro;

mod atomic;
#[cfg(feature = "external")]
mod backend;
mod order;
mod primitive;
mod pun;
mod scheme;

pub mod ops;
pub mod registry;

pub(crate) mod sealed {
    pub trait Sealed {}
}

pub use atomic::Atomic;
#[cfg(feature = "external")]
pub use backend::{
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
pub use ops::{
    NativeOp,
    Operation,
    Update,
};
pub use order::SyncOrder;
pub use primitive::Primitive;
pub use pun::{
    PunPrim,
    Punnable,
};
pub use scheme::{
    ApplyOp,
    Lock,
    Lockless,
    Native,
    Scheme,
    SchemeRead,
    Serial,
    Strong,
    StrongPun,
    ThreadSafe,
    Weak,
    WeakPun,
};
