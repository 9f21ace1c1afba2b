#![no_std]
#![warn(missing_docs)]

//! A double-ended queue backed by a doubly linked list.
//!
//! [`Deq`] supports insertion, removal, indexed access and removal by value
//! at either [`End`], plus in-place traversal and space-joined rendering.
//! Nodes live in an internal pool and refer to their neighbors by
//! generation-checked handles rather than raw pointers.

extern crate alloc;

mod pool;

pub mod deq;
pub mod error;

pub use crate::deq::{Deq, End, IntoIter, Iter};
pub use crate::error::DeqError;
