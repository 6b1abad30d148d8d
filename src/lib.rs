#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ownkit_ptr as ptr;
pub use ownkit_result as result;
