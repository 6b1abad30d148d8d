#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod result;
mod state;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::{CantDereference, NotHaveFailedObject};
pub use result::DiscriminatedResult;
pub use state::State;
