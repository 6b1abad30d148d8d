#![doc = include_str!("../README.md")]
//!
//! **OwningClonePtr**
//!
//! [`OwningClonePtr<T>`] owns a heap object of type `T` or of any type that can
//! be [`Upcast`] to `T`. A capability bound to the concrete type is captured when
//! the object is adopted; every clone and every destruction goes through it.
//!
//! **Upcast**
//!
//! [`Upcast<T>`] declares that a concrete type may be held behind `T`.
//! Sized types upcast to themselves; trait-object bases are declared with
//! [`impl_upcast!`].
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod clone_ptr;
mod cloner;
mod upcast;

// -----------------------------------------------------------------------------
// Top-level exports

pub use clone_ptr::OwningClonePtr;
pub use upcast::Upcast;

#[doc(hidden)]
pub mod exports {
    pub use alloc::boxed::Box;
}
