use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::ops::Range;

use crate::core::error::{Error, Result};
use crate::core::index::Index;

/// A label drawn from an axis: a plain label for flat axes, or an
/// (outer, inner) pair for two-level hierarchical axes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    Flat(L),
    Pair(L, L),
}

impl<L> Display for Label<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Flat(v) => write!(f, "{}", v),
            Label::Pair(outer, inner) => write!(f, "({}, {})", outer, inner),
        }
    }
}

/// A two-level hierarchical index
///
/// An ordered sequence of (outer, inner) label pairs in which equal outer
/// labels occupy contiguous runs. Pair lookup resolves duplicates to the
/// first occurrence; so does outer-span lookup when an outer label recurs
/// in non-adjacent runs.
#[derive(Debug, Clone, PartialEq)]
pub struct HierIndex<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    /// (outer, inner) pairs in axis order
    pairs: Vec<(L, L)>,

    /// Contiguous runs of equal outer labels, in axis order
    spans: Vec<(L, Range<usize>)>,

    /// Mapping from pair to first occurrence position
    map: HashMap<(L, L), usize>,

    /// Index name (optional)
    name: Option<String>,
}

impl<L> HierIndex<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    /// Creates a hierarchical index, grouping adjacent equal outer labels into runs
    pub fn new(pairs: Vec<(L, L)>) -> Self {
        let mut spans: Vec<(L, Range<usize>)> = Vec::new();
        let mut map = HashMap::with_capacity(pairs.len());
        for (i, pair) in pairs.iter().enumerate() {
            match spans.last_mut() {
                Some((outer, range)) if *outer == pair.0 => range.end = i + 1,
                _ => spans.push((pair.0.clone(), i..i + 1)),
            }
            map.entry(pair.clone()).or_insert(i);
        }
        HierIndex {
            pairs,
            spans,
            map,
            name: None,
        }
    }

    /// Get the length of the index
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Get all (outer, inner) pairs
    pub fn pairs(&self) -> &[(L, L)] {
        &self.pairs
    }

    /// Get the pair at a position
    pub fn get_pair(&self, pos: usize) -> Option<&(L, L)> {
        self.pairs.get(pos)
    }

    /// Get the outer label at a position
    pub fn outer_at(&self, pos: usize) -> Option<&L> {
        self.pairs.get(pos).map(|(outer, _)| outer)
    }

    /// Get the position of a pair, resolving duplicates to the first occurrence
    pub fn get_loc(&self, key: &(L, L)) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Get the contiguous positions covered by an outer label (first run wins)
    pub fn span_of(&self, outer: &L) -> Option<Range<usize>> {
        self.spans
            .iter()
            .find(|(o, _)| o == outer)
            .map(|(_, range)| range.clone())
    }

    /// Ordered (outer, run) view of the index
    pub fn spans(&self) -> &[(L, Range<usize>)] {
        &self.spans
    }

    /// Drop the outer level, keeping inner labels only (duplicates permitted)
    pub fn inner_index(&self) -> Index<L> {
        Index::with_name(
            self.pairs.iter().map(|(_, inner)| inner.clone()).collect(),
            self.name.clone(),
        )
    }

    /// Build a new hierarchical index from the pairs at the given positions
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let mut pairs = Vec::with_capacity(positions.len());
        for &pos in positions {
            match self.pairs.get(pos) {
                Some(p) => pairs.push(p.clone()),
                None => {
                    return Err(Error::PositionOutOfBounds {
                        index: pos,
                        size: self.pairs.len(),
                    })
                }
            }
        }
        Ok(Self::new(pairs))
    }

    /// Concatenate several hierarchical indexes in input order
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        L: 'a,
    {
        let mut pairs = Vec::new();
        for part in parts {
            pairs.extend(part.pairs.iter().cloned());
        }
        Self::new(pairs)
    }
}

/// The public label view of one axis: either a flat single-level index or
/// a two-level hierarchical index
#[derive(Debug, Clone, PartialEq)]
pub enum AxisLabels<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    Flat(Index<L>),
    Hier(HierIndex<L>),
}

impl<L> AxisLabels<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    /// Get the length of the axis
    pub fn len(&self) -> usize {
        match self {
            AxisLabels::Flat(idx) => idx.len(),
            AxisLabels::Hier(idx) => idx.len(),
        }
    }

    /// Check if the axis is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The flat index, if this axis is single-level
    pub fn as_flat(&self) -> Option<&Index<L>> {
        match self {
            AxisLabels::Flat(idx) => Some(idx),
            AxisLabels::Hier(_) => None,
        }
    }

    /// The hierarchical index, if this axis is two-level
    pub fn as_hier(&self) -> Option<&HierIndex<L>> {
        match self {
            AxisLabels::Flat(_) => None,
            AxisLabels::Hier(idx) => Some(idx),
        }
    }

    /// Get the label at a position
    pub fn label_at(&self, pos: usize) -> Option<Label<L>> {
        match self {
            AxisLabels::Flat(idx) => idx.get_value(pos).map(|v| Label::Flat(v.clone())),
            AxisLabels::Hier(idx) => idx
                .get_pair(pos)
                .map(|(o, i)| Label::Pair(o.clone(), i.clone())),
        }
    }

    /// Get the position of a label, resolving duplicates to the first occurrence
    pub fn get_loc(&self, key: &Label<L>) -> Option<usize> {
        match (self, key) {
            (AxisLabels::Flat(idx), Label::Flat(v)) => idx.get_loc(v),
            (AxisLabels::Hier(idx), Label::Pair(o, i)) => {
                idx.get_loc(&(o.clone(), i.clone()))
            }
            _ => None,
        }
    }

    /// Whether the axis contains a label
    pub fn contains(&self, key: &Label<L>) -> bool {
        self.get_loc(key).is_some()
    }

    /// Iterate over labels in axis order
    pub fn iter_labels(&self) -> impl Iterator<Item = Label<L>> + '_ {
        (0..self.len()).filter_map(move |pos| self.label_at(pos))
    }

    /// Build a new axis from the labels at the given positions
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        match self {
            AxisLabels::Flat(idx) => Ok(AxisLabels::Flat(idx.take(positions)?)),
            AxisLabels::Hier(idx) => Ok(AxisLabels::Hier(idx.take(positions)?)),
        }
    }

    /// Wrap every label with an outer level, turning a flat axis hierarchical
    ///
    /// # Errors
    /// Returns `Error::InvalidOperation` if the axis is already two-level
    pub fn add_outer(&self, outer: &L) -> Result<Self> {
        match self {
            AxisLabels::Flat(idx) => Ok(AxisLabels::Hier(HierIndex::new(
                idx.iter().map(|v| (outer.clone(), v.clone())).collect(),
            ))),
            AxisLabels::Hier(_) => Err(Error::InvalidOperation(
                "cannot add an outer level to an axis that is already hierarchical".to_string(),
            )),
        }
    }

    /// Concatenate several axes in input order; all parts must share the same level count
    pub fn concat<'a, I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        L: 'a,
    {
        let parts: Vec<&Self> = parts.into_iter().collect();
        if parts.is_empty() {
            return Err(Error::EmptyData("no axes to concatenate".to_string()));
        }
        if parts.iter().all(|p| matches!(p, AxisLabels::Flat(_))) {
            let flats: Vec<&Index<L>> = parts.iter().filter_map(|p| p.as_flat()).collect();
            Ok(AxisLabels::Flat(Index::concat(flats.into_iter())))
        } else if parts.iter().all(|p| matches!(p, AxisLabels::Hier(_))) {
            let hiers: Vec<&HierIndex<L>> = parts.iter().filter_map(|p| p.as_hier()).collect();
            Ok(AxisLabels::Hier(HierIndex::concat(hiers.into_iter())))
        } else {
            Err(Error::InvalidOperation(
                "cannot concatenate flat and hierarchical axes".to_string(),
            ))
        }
    }
}
