use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::Range;

use crate::core::error::{Error, Result};
use crate::core::hier_index::{AxisLabels, Label};

/// Positional selector over one axis
///
/// `At` is the scalar, dimensionality-reducing form. `Range` follows slice
/// semantics (half-open, clamped to the axis length, so a zero-extent range
/// is a valid empty selection).
#[derive(Debug, Clone, PartialEq)]
pub enum PosSelect {
    /// Every position on the axis
    All,
    /// A single position; reduces dimensionality
    At(usize),
    /// A contiguous half-open range of positions
    Range(Range<usize>),
    /// An explicit position sequence, in selection order
    List(Vec<usize>),
    /// A boolean mask, one flag per axis position
    Mask(Vec<bool>),
}

impl PosSelect {
    /// Whether this selector reduces dimensionality
    pub fn is_scalar(&self) -> bool {
        matches!(self, PosSelect::At(_))
    }

    /// Resolve to concrete positions in selection order
    ///
    /// # Errors
    /// `Error::PositionOutOfBounds` for an `At` or `List` position past the
    /// end; `Error::LengthMismatch` for a mask of the wrong length
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        match self {
            PosSelect::All => Ok((0..len).collect()),
            PosSelect::At(pos) => {
                if *pos >= len {
                    return Err(Error::PositionOutOfBounds {
                        index: *pos,
                        size: len,
                    });
                }
                Ok(vec![*pos])
            }
            PosSelect::Range(range) => {
                let start = range.start.min(len);
                let end = range.end.min(len);
                if start > end {
                    return Ok(Vec::new());
                }
                Ok((start..end).collect())
            }
            PosSelect::List(list) => {
                for &pos in list {
                    if pos >= len {
                        return Err(Error::PositionOutOfBounds {
                            index: pos,
                            size: len,
                        });
                    }
                }
                Ok(list.clone())
            }
            PosSelect::Mask(mask) => {
                if mask.len() != len {
                    return Err(Error::LengthMismatch {
                        expected: len,
                        actual: mask.len(),
                    });
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter(|(_, &flag)| flag)
                    .map(|(i, _)| i)
                    .collect())
            }
        }
    }

    /// Resolve to a boolean vector over the whole axis
    pub fn mask(&self, len: usize) -> Result<Vec<bool>> {
        let mut mask = vec![false; len];
        for pos in self.positions(len)? {
            mask[pos] = true;
        }
        Ok(mask)
    }
}

/// Label-based selector over one axis, resolved against the axis labels
/// into a `PosSelect` before extraction
///
/// `Range` is inclusive of both endpoints, following loc semantics.
/// `Outer` selects the whole contiguous run owned by an outer label of a
/// hierarchical axis.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelSelect<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    All,
    At(Label<L>),
    Range(Label<L>, Label<L>),
    List(Vec<Label<L>>),
    Outer(L),
}

impl<L> LabelSelect<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    /// Select a single flat label; reduces dimensionality
    pub fn at(label: L) -> Self {
        LabelSelect::At(Label::Flat(label))
    }

    /// Select a single (outer, inner) pair of a hierarchical axis
    pub fn pair(outer: L, inner: L) -> Self {
        LabelSelect::At(Label::Pair(outer, inner))
    }

    /// Select an inclusive range of flat labels
    pub fn range(from: L, to: L) -> Self {
        LabelSelect::Range(Label::Flat(from), Label::Flat(to))
    }

    /// Select a sequence of flat labels, in order
    pub fn list(labels: Vec<L>) -> Self {
        LabelSelect::List(labels.into_iter().map(Label::Flat).collect())
    }

    /// Select every position owned by an outer label
    pub fn outer(outer: L) -> Self {
        LabelSelect::Outer(outer)
    }

    /// Resolve against an axis into a positional selector
    pub fn resolve(&self, axis: &AxisLabels<L>) -> Result<PosSelect> {
        let locate = |key: &Label<L>| -> Result<usize> {
            axis.get_loc(key)
                .ok_or_else(|| Error::LabelNotFound(key.to_string()))
        };
        match self {
            LabelSelect::All => Ok(PosSelect::All),
            LabelSelect::At(key) => Ok(PosSelect::At(locate(key)?)),
            LabelSelect::Range(from, to) => {
                let start = locate(from)?;
                let end = locate(to)?;
                if start > end {
                    return Ok(PosSelect::Range(start..start));
                }
                Ok(PosSelect::Range(start..end + 1))
            }
            LabelSelect::List(keys) => {
                let mut positions = Vec::with_capacity(keys.len());
                for key in keys {
                    positions.push(locate(key)?);
                }
                Ok(PosSelect::List(positions))
            }
            LabelSelect::Outer(outer) => match axis.as_hier() {
                Some(hier) => hier
                    .span_of(outer)
                    .map(PosSelect::Range)
                    .ok_or_else(|| Error::LabelNotFound(outer.to_string())),
                None => Err(Error::InvalidOperation(
                    "outer-label selection requires a hierarchical axis".to_string(),
                )),
            },
        }
    }
}
