//! Subscript parser
//!
//! Parses and validates Einstein summation subscripts like `"ij,jk->ik"`, and
//! accepts the same information in structured form for callers that build
//! label lists directly.

use std::collections::HashSet;
use std::fmt;

use crate::error::{SubscriptError, SubscriptResult};
use crate::label::Label;

/// Validated subscripts: one label list per operand plus the output labels.
///
/// Invariants upheld by every constructor:
/// - output labels are distinct;
/// - every output label appears in at least one operand.
///
/// Operand label lists may repeat a label (`"ii->i"` takes a diagonal).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSubscripts"))]
pub struct Subscripts {
    operands: Vec<Vec<Label>>,
    output: Vec<Label>,
}

/// Unvalidated wire form of [`Subscripts`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSubscripts {
    operands: Vec<Vec<Label>>,
    output: Vec<Label>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSubscripts> for Subscripts {
    type Error = SubscriptError;

    fn try_from(raw: RawSubscripts) -> SubscriptResult<Self> {
        Subscripts::new(raw.operands, raw.output)
    }
}

impl Subscripts {
    /// Build subscripts from structured label lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_planner::{Label, Subscripts};
    ///
    /// // Sum a rank-2 operand over axis 1
    /// let subs = Subscripts::new(
    ///     vec![vec![Label::Axis(0), Label::Axis(1)]],
    ///     vec![Label::Axis(0)],
    /// )?;
    /// assert_eq!(subs.marginal_labels(), vec![Label::Axis(1)]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(operands: Vec<Vec<Label>>, output: Vec<Label>) -> SubscriptResult<Self> {
        let mut seen = HashSet::new();
        for label in &output {
            if !seen.insert(*label) {
                return Err(SubscriptError::malformed(format!(
                    "output label '{label}' appears more than once"
                )));
            }
        }

        let bound: HashSet<Label> = operands.iter().flatten().copied().collect();
        if let Some(&label) = output.iter().find(|l| !bound.contains(l)) {
            return Err(SubscriptError::UnboundOutputLabel { label });
        }

        Ok(Self { operands, output })
    }

    /// Parse the string form.
    ///
    /// - Operands are separated by `,` and the output follows `->`.
    /// - Labels are ASCII letters; whitespace is ignored.
    /// - Without `->`, the output is every label that appears exactly once,
    ///   in sorted order (so `"ij,jk"` means `"ij,jk->ik"`).
    /// - An operand with no labels is a 0-dimensional operand.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_planner::{labels, Subscripts};
    ///
    /// let subs = Subscripts::parse("ij, jk -> ik")?;
    /// assert_eq!(subs.num_operands(), 2);
    /// assert_eq!(subs.output(), labels("ik").as_slice());
    /// assert_eq!(subs.marginal_labels(), labels("j"));
    ///
    /// let trace = Subscripts::parse("ii")?;
    /// assert!(trace.output().is_empty());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn parse(spec: &str) -> SubscriptResult<Self> {
        let compact: String = spec.chars().filter(|c| !c.is_whitespace()).collect();

        let parts: Vec<&str> = compact.split("->").collect();
        if parts.len() > 2 {
            return Err(SubscriptError::malformed("multiple '->' found"));
        }

        let operands = parts[0]
            .split(',')
            .enumerate()
            .map(|(i, s)| parse_labels(s, &format!("operand {i}")))
            .collect::<SubscriptResult<Vec<_>>>()?;

        let output = match parts.get(1) {
            Some(out) => parse_labels(out, "output")?,
            None => implicit_output(&operands),
        };

        let subs = Self::new(operands, output)?;
        tracing::trace!(spec, parsed = %subs, "parsed subscripts");
        Ok(subs)
    }

    pub fn operands(&self) -> &[Vec<Label>] {
        &self.operands
    }

    pub fn output(&self) -> &[Label] {
        &self.output
    }

    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    /// Union of operand labels, in order of first appearance.
    pub fn input_labels(&self) -> Vec<Label> {
        let mut seen = HashSet::new();
        self.operands
            .iter()
            .flatten()
            .copied()
            .filter(|l| seen.insert(*l))
            .collect()
    }

    /// Input labels that are not output labels: the axes reduced away.
    pub fn marginal_labels(&self) -> Vec<Label> {
        self.input_labels()
            .into_iter()
            .filter(|l| !self.output.contains(l))
            .collect()
    }

    pub fn is_marginal(&self, label: Label) -> bool {
        !self.output.contains(&label) && self.operands.iter().flatten().any(|&l| l == label)
    }
}

impl fmt::Display for Subscripts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            for label in op {
                write!(f, "{label}")?;
            }
        }
        write!(f, "->")?;
        for label in &self.output {
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

fn parse_labels(s: &str, what: &str) -> SubscriptResult<Vec<Label>> {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                Ok(Label::Char(c))
            } else {
                Err(SubscriptError::malformed(format!(
                    "invalid character '{c}' in {what} (only ASCII letters allowed)"
                )))
            }
        })
        .collect()
}

/// Labels that appear exactly once across all operands, sorted.
fn implicit_output(operands: &[Vec<Label>]) -> Vec<Label> {
    let all: Vec<Label> = operands.iter().flatten().copied().collect();
    let mut once: Vec<Label> = all
        .iter()
        .copied()
        .filter(|l| all.iter().filter(|m| *m == l).count() == 1)
        .collect();
    once.sort();
    once
}

/// Subscripts as accepted at the API boundary: either text to parse or
/// structured labels. Resolved once, before any shape is inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptSpec {
    Text(String),
    Labels(Subscripts),
}

impl SubscriptSpec {
    /// Parse (for text) or pass through (for structured labels).
    pub fn resolve(self) -> SubscriptResult<Subscripts> {
        match self {
            SubscriptSpec::Text(s) => Subscripts::parse(&s),
            SubscriptSpec::Labels(subs) => Ok(subs),
        }
    }
}

impl From<&str> for SubscriptSpec {
    fn from(s: &str) -> Self {
        SubscriptSpec::Text(s.to_string())
    }
}

impl From<String> for SubscriptSpec {
    fn from(s: String) -> Self {
        SubscriptSpec::Text(s)
    }
}

impl From<&String> for SubscriptSpec {
    fn from(s: &String) -> Self {
        SubscriptSpec::Text(s.clone())
    }
}

impl From<Subscripts> for SubscriptSpec {
    fn from(subs: Subscripts) -> Self {
        SubscriptSpec::Labels(subs)
    }
}
