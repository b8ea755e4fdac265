//! Dense tensors over a shared, lockable buffer
//!
//! This module is split into focused submodules:
//!
//! - [`types`] - the [`Tensor`] type, its buffer and basic accessors
//! - [`indexing`] - element access, key-based selection and assignment
//! - [`nested`] - conversion to and from nested sequences
//! - [`creation`] - constructors (`zeros`, `ones`, `from_fn`, random fills, ...)
//! - [`broadcast`] - broadcasting shapes and stride-0 views
//!
//! # Sharing model
//!
//! Slicing and broadcasting return new tensors that share the original buffer.
//! Writing through any of them is visible through every other tensor whose view
//! covers the same buffer position:
//!
//! ```
//! use einarray_core::{Slice, Tensor};
//!
//! let t = Tensor::<f64>::from_vec((0..6).map(f64::from).collect(), &[2, 3])?;
//! let col = t.select(&[Slice::full().into(), 2.into()])?.into_tensor();
//!
//! col.set(&[1], 50.0)?;
//! assert_eq!(t.get(&[1, 2])?, 50.0);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod broadcast;
pub mod creation;
pub mod indexing;
pub mod nested;
pub mod types;

pub use broadcast::{broadcast, broadcast_shapes, broadcast_shapes_with, broadcast_with, BroadcastMode};
pub use indexing::OuterIter;
pub use nested::{Nested, NestedData};
pub use types::Tensor;
