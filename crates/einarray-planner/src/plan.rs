//! Shape binding for reductions
//!
//! A [`ReductionPlan`] binds every label of a [`Subscripts`] to a size using the
//! operand shapes, and precomputes how each operand's axes project out of the
//! combined index `output ++ marginal`. Execution then only walks index tuples.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::error::{SubscriptError, SubscriptResult};
use crate::label::Label;
use crate::parser::Subscripts;

/// Axis extents, inline for up to 6 axes.
pub type Extents = SmallVec<[usize; 6]>;

/// Validated subscripts bound to concrete operand shapes.
///
/// # Examples
///
/// ```
/// use einarray_planner::{ReductionPlan, Subscripts};
///
/// let subs = Subscripts::parse("ij,jk->ik")?;
/// let plan = ReductionPlan::new(&subs, &[&[2, 3], &[3, 4]])?;
///
/// assert_eq!(plan.output_shape(), &[2, 4]);
/// assert_eq!(plan.marginal_shape(), &[3]);
/// // combined index is (i, k, j)
/// assert_eq!(plan.operand_axes(0), &[0, 2]);
/// assert_eq!(plan.operand_axes(1), &[2, 1]);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionPlan {
    subscripts: Subscripts,
    sizes: HashMap<Label, usize>,
    marginal: Vec<Label>,
    output_shape: Extents,
    marginal_shape: Extents,
    operand_axes: Vec<Vec<usize>>,
}

impl ReductionPlan {
    /// Bind `subscripts` to operand `shapes`.
    ///
    /// Fails with [`SubscriptError::MalformedSubscript`] when the number of
    /// operands or an operand's rank disagrees with the subscripts, and with
    /// [`SubscriptError::InconsistentDimension`] when one label meets two sizes.
    pub fn new(subscripts: &Subscripts, shapes: &[&[usize]]) -> SubscriptResult<Self> {
        if subscripts.num_operands() != shapes.len() {
            return Err(SubscriptError::malformed(format!(
                "subscripts name {} operands but {} were given",
                subscripts.num_operands(),
                shapes.len()
            )));
        }

        let mut sizes: HashMap<Label, usize> = HashMap::new();
        for (i, (labels, shape)) in subscripts.operands().iter().zip(shapes).enumerate() {
            if labels.len() != shape.len() {
                return Err(SubscriptError::malformed(format!(
                    "operand {i} has {} labels but rank {}",
                    labels.len(),
                    shape.len()
                )));
            }
            for (&label, &size) in labels.iter().zip(shape.iter()) {
                match sizes.get(&label) {
                    Some(&first) if first != size => {
                        return Err(SubscriptError::InconsistentDimension {
                            label,
                            first,
                            second: size,
                        });
                    }
                    Some(_) => {}
                    None => {
                        sizes.insert(label, size);
                    }
                }
            }
        }

        let marginal = subscripts.marginal_labels();
        let bound = |&label: &Label| {
            sizes
                .get(&label)
                .copied()
                .ok_or(SubscriptError::UnboundOutputLabel { label })
        };
        let output_shape = subscripts
            .output()
            .iter()
            .map(bound)
            .collect::<SubscriptResult<Extents>>()?;
        let marginal_shape = marginal.iter().map(bound).collect::<SubscriptResult<Extents>>()?;

        // Position of each label in the combined (output ++ marginal) index
        let position: HashMap<Label, usize> = subscripts
            .output()
            .iter()
            .chain(marginal.iter())
            .enumerate()
            .map(|(i, &l)| (l, i))
            .collect();
        let operand_axes = subscripts
            .operands()
            .iter()
            .map(|labels| labels.iter().map(|l| position[l]).collect())
            .collect();

        tracing::debug!(
            subscripts = %subscripts,
            output_shape = ?output_shape.as_slice(),
            marginal_shape = ?marginal_shape.as_slice(),
            "bound reduction plan"
        );

        Ok(Self {
            subscripts: subscripts.clone(),
            sizes,
            marginal,
            output_shape,
            marginal_shape,
            operand_axes,
        })
    }

    pub fn subscripts(&self) -> &Subscripts {
        &self.subscripts
    }

    /// Size bound to `label`, if any operand carries it.
    pub fn size_of(&self, label: Label) -> Option<usize> {
        self.sizes.get(&label).copied()
    }

    pub fn output_labels(&self) -> &[Label] {
        self.subscripts.output()
    }

    pub fn marginal_labels(&self) -> &[Label] {
        &self.marginal
    }

    pub fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    pub fn marginal_shape(&self) -> &[usize] {
        &self.marginal_shape
    }

    /// For operand `i`, the position in the combined index of each of its axes.
    pub fn operand_axes(&self, i: usize) -> &[usize] {
        &self.operand_axes[i]
    }

    pub fn num_operands(&self) -> usize {
        self.operand_axes.len()
    }

    /// Number of terms folded into each output element.
    pub fn terms_per_output(&self) -> usize {
        self.marginal_shape.iter().product()
    }

    /// True when the output has no axes and the result is a bare scalar.
    pub fn is_scalar_output(&self) -> bool {
        self.output_shape.is_empty()
    }
}
