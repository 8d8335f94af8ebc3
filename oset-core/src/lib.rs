//! # oset-core
//!
//! Comparator-free traits and shared error types for the ordered-set
//! workspace.
//!
//! This crate provides the foundational traits ([`Container`], [`Ordered`],
//! [`Tree`], the [`Printable`]/[`PrintableNode`] renderer capability) and
//! the one error type ([`OverlapError`]) used by `oset-trees`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod traits;

pub use error::{OverlapError, Result};
pub use traits::*;
