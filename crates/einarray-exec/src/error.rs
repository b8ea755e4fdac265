//! Error types for reductions and elementwise execution

use einarray_core::TensorError;
use einarray_planner::SubscriptError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecError {
    /// Shape, indexing or broadcasting failure
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// Malformed, unbound or inconsistent subscripts
    #[error(transparent)]
    Subscript(#[from] SubscriptError),

    /// A reduced axis has size 0 and the reducer has no identity value.
    #[error("cannot reduce over empty axes {labels} without an identity value")]
    EmptyReduction { labels: String },

    #[error("no inputs provided to einsum_ex")]
    MissingInputs,
}

pub type ExecResult<T> = Result<T, ExecError>;
