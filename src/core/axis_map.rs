use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::Range;

use crate::bus::Bus;
use crate::core::axis::Axis;
use crate::core::error::{Error, Result};
use crate::core::hier_index::HierIndex;
use crate::core::index::Index;

/// Maps every global position along the partitioned axis of a virtual
/// frame to the partition that owns it
///
/// The map is an ordered hierarchical sequence of (partition label, local
/// label) pairs, one entry per global position, in bus-iteration-then-local
/// order; the owner of an entry is its outer label. Entry order is fixed at
/// construction and never re-sorted, which keeps each partition's positions
/// contiguous and addressable as a span.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMap<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    keys: HierIndex<L>,
}

impl<L> AxisMap<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    /// Build from an ordered (partition label, local axis labels) tree
    ///
    /// Entries appear in tree iteration order; no reordering and no
    /// deduplication across partitions.
    pub fn from_tree(tree: Vec<(L, Index<L>)>) -> Self {
        let mut pairs = Vec::new();
        for (owner, locals) in &tree {
            for local in locals.iter() {
                pairs.push((owner.clone(), local.clone()));
            }
        }
        AxisMap {
            keys: HierIndex::new(pairs),
        }
    }

    /// Build from a bus, taking each partition's row (axis 0) or column
    /// (axis 1) labels in bus order
    ///
    /// Every partition is fetched once; fetch errors propagate unchanged.
    pub fn from_bus<T>(bus: &Bus<L, T>, axis: usize) -> Result<Self>
    where
        T: Debug + Clone,
    {
        let axis = Axis::from_usize(axis)?;
        let mut tree = Vec::with_capacity(bus.len());
        for pos in 0..bus.len() {
            let partition = bus.get_by_position(pos)?;
            let local = match axis {
                Axis::Rows => partition.row_index(),
                Axis::Columns => partition.column_index(),
            };
            let flat = local.as_flat().ok_or_else(|| {
                Error::InvalidOperation(
                    "bus partitions must carry single-level axis labels".to_string(),
                )
            })?;
            tree.push((bus.labels()[pos].clone(), flat.clone()));
        }
        Ok(Self::from_tree(tree))
    }

    /// Total number of global positions along the partitioned axis
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the map covers no positions
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The hierarchical (partition label, local label) keys
    pub fn keys(&self) -> &HierIndex<L> {
        &self.keys
    }

    /// The partition label owning a global position
    pub fn owner_at(&self, pos: usize) -> Option<&L> {
        self.keys.outer_at(pos)
    }

    /// The contiguous global positions owned by a partition label
    pub fn span_of(&self, owner: &L) -> Option<Range<usize>> {
        self.keys.span_of(owner)
    }

    /// Owners of the given positions, first-occurrence-deduplicated, in
    /// position-sequence order
    pub fn owners_for(&self, positions: &[usize]) -> Result<Vec<L>> {
        let mut seen = HashSet::new();
        let mut owners = Vec::new();
        for &pos in positions {
            let owner = self
                .keys
                .outer_at(pos)
                .ok_or(Error::PositionOutOfBounds {
                    index: pos,
                    size: self.keys.len(),
                })?;
            if seen.insert(owner.clone()) {
                owners.push(owner.clone());
            }
        }
        Ok(owners)
    }

    /// The partition-level drop of the keys: local labels only
    pub fn inner_index(&self) -> Index<L> {
        self.keys.inner_index()
    }
}
