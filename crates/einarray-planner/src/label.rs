//! Axis labels
//!
//! Labels are opaque comparable tokens naming the axes of reduction operands.
//! The string form of subscripts uses letters; structured subscripts built by
//! axis reductions use positional labels.

use std::fmt;

/// One axis label.
///
/// Ordering puts every [`Label::Char`] before every [`Label::Axis`]; within a
/// kind, labels order by character code or axis number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    Char(char),
    Axis(usize),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Char(c) => write!(f, "{c}"),
            Label::Axis(n) => write!(f, "#{n}"),
        }
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Label::Char(c)
    }
}

impl From<usize> for Label {
    fn from(n: usize) -> Self {
        Label::Axis(n)
    }
}

/// Labels of `s`, one per character.
pub fn labels(s: &str) -> Vec<Label> {
    s.chars().map(Label::Char).collect()
}
