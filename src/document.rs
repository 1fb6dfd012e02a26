//! Core text transformations shared by the split and merge pipelines.
//!
//! The leaves of the system: title and identifier derivation, document
//! segmentation, and cross-reference rewriting. Everything here is pure and
//! filesystem-free; the [`crate::merge`] and [`crate::split`] assemblers do
//! the I/O.

pub mod links;
pub mod section;
pub mod title;

pub use section::{Section, Segments, SplitStrategy};
