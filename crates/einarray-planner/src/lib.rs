//! # einarray-planner
//!
//! Subscript parsing and shape binding for einarray's generalized reductions.
//!
//! A reduction is described by subscripts naming the axes of each operand and
//! of the output. This crate turns the user-facing forms into a validated
//! [`Subscripts`] value and binds it to operand shapes as a [`ReductionPlan`];
//! executing the plan is left to `einarray-exec`.
//!
//! ## Quick Start
//!
//! ```
//! use einarray_planner::{ReductionPlan, SubscriptSpec};
//!
//! // Strings and structured labels arrive as one tagged value
//! let subs = SubscriptSpec::from("bij,bjk->bik").resolve()?;
//!
//! let plan = ReductionPlan::new(&subs, &[&[8, 2, 3], &[8, 3, 4]])?;
//! assert_eq!(plan.output_shape(), &[8, 2, 4]);
//! assert_eq!(plan.marginal_shape(), &[3]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Subscript Syntax
//!
//! - Operands separated by `,`, output after `->`
//! - Labels are ASCII letters; whitespace is ignored
//! - A label repeated inside one operand takes a diagonal (`"ii->i"`)
//! - A label missing from the output is summed over (a *marginal* label)
//! - Without `->` the output is every label used exactly once, sorted
//!
//! ## Errors
//!
//! See [`SubscriptError`]; malformed syntax, unbound output labels and
//! inconsistent dimensions are reported as distinct kinds.

#![deny(warnings)]

pub mod error;
pub mod label;
pub mod parser;
pub mod plan;


pub use error::{SubscriptError, SubscriptResult};
pub use label::{labels, Label};
pub use parser::{SubscriptSpec, Subscripts};
pub use plan::{Extents, ReductionPlan};
