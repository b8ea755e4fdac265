//! Error types for subscript parsing and shape binding
//!
//! The three kinds are kept distinct and never coerced into one another:
//!
//! - [`SubscriptError::MalformedSubscript`]: the subscripts themselves are
//!   invalid, or do not fit the operands (count or rank)
//! - [`SubscriptError::UnboundOutputLabel`]: an output label no operand carries
//! - [`SubscriptError::InconsistentDimension`]: one label bound to two sizes
//!
//! # Examples
//!
//! ```
//! use einarray_planner::{Subscripts, SubscriptError};
//!
//! let err = Subscripts::parse("ij,jk->iz").unwrap_err();
//! assert!(matches!(err, SubscriptError::UnboundOutputLabel { .. }));
//! ```

use thiserror::Error;

use crate::label::Label;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptError {
    #[error("malformed subscripts: {reason}")]
    MalformedSubscript { reason: String },

    #[error("output label '{label}' does not appear in any operand")]
    UnboundOutputLabel { label: Label },

    #[error("label '{label}' is bound to size {first} and to size {second}")]
    InconsistentDimension {
        label: Label,
        first: usize,
        second: usize,
    },
}

impl SubscriptError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SubscriptError::MalformedSubscript {
            reason: reason.into(),
        }
    }
}

pub type SubscriptResult<T> = Result<T, SubscriptError>;
