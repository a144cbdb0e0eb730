//! Virtual frame module - a frame-like view over the contents of a bus
//!
//! A [`VirtualFrame`] presents one logical 2-dimensional table backed by
//! independently loaded partitions, without materializing the whole table
//! unless asked. Unified axis labels are computed lazily on first access
//! and cached for the frame's lifetime; selections are translated into
//! per-partition sub-selections and merged back into a single result.

mod iter;
mod select;

pub use iter::AxisArrays;

use std::cell::OnceCell;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::bus::Bus;
use crate::core::axis::Axis;
use crate::core::axis_map::AxisMap;
use crate::core::error::{Error, Result};
use crate::core::hier_index::{AxisLabels, Label};
use crate::core::index::Index;
use crate::core::select::PosSelect;
use crate::frame::Frame;
use crate::series::Series;

/// Axis state computed once, on first access
#[derive(Debug, Clone)]
pub(crate) struct ResolvedAxes<L>
where
    L: Debug + Clone + Eq + Hash + Display,
{
    pub axis_map: AxisMap<L>,
    pub opposite: Index<L>,
    pub index: AxisLabels<L>,
    pub columns: AxisLabels<L>,
}

/// A read-only, frame-like view over the partitions of a [`Bus`]
///
/// The partitioned axis carries either hierarchical (partition, local)
/// labels or flattened local labels, per `retain_labels`. The opposite
/// axis is taken from the first partition in bus order and is not
/// validated against the rest.
pub struct VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    bus: Bus<L, T>,
    axis: Axis,
    retain_labels: bool,
    axis_map_seed: Option<AxisMap<L>>,
    opposite_seed: Option<Index<L>>,
    resolved: OnceCell<ResolvedAxes<L>>,
}

impl<L, T> Debug for VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFrame")
            .field("name", &self.bus.name())
            .field("axis", &self.axis)
            .field("retain_labels", &self.retain_labels)
            .field("partitions", &self.bus.len())
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

impl<L, T> VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Create a virtual frame over an existing bus
    ///
    /// `axis` is the partitioned axis: 0 when partitions stack vertically
    /// (aligned columns), 1 when they stack horizontally (aligned rows).
    pub fn new(bus: Bus<L, T>, axis: usize, retain_labels: bool) -> Result<Self> {
        Self::with_axis_state(bus, axis, retain_labels, None, None)
    }

    /// Create a virtual frame with pre-computed axis state
    ///
    /// Callers that already hold the axis map and opposite-axis labels
    /// (the partitioning constructor, `rename`) pass them in so the lazy
    /// resolution step reuses them instead of re-deriving from the bus.
    pub fn with_axis_state(
        bus: Bus<L, T>,
        axis: usize,
        retain_labels: bool,
        axis_map: Option<AxisMap<L>>,
        opposite: Option<Index<L>>,
    ) -> Result<Self> {
        let axis = Axis::from_usize(axis)?;
        Ok(Self {
            bus,
            axis,
            retain_labels,
            axis_map_seed: axis_map,
            opposite_seed: opposite,
            resolved: OnceCell::new(),
        })
    }

    /// Partition a frame into fixed-size chunks and wrap them as a
    /// virtual frame
    ///
    /// Contiguous position ranges of `chunksize` are cut along `axis`
    /// (the last may be shorter). Each chunk's label is derived by
    /// `label_extractor` from the chunk's local axis labels (default: the
    /// chunk's first local label); derived labels are not checked for
    /// collisions. The chunks become partitions of a fresh bus, and the
    /// axis map is built from the same pass.
    pub fn from_frame(
        frame: &Frame<L, T>,
        chunksize: usize,
        axis: usize,
        retain_labels: bool,
        label_extractor: Option<&dyn Fn(&Index<L>) -> L>,
    ) -> Result<Self> {
        let part_axis = Axis::from_usize(axis)?;
        if chunksize == 0 {
            return Err(Error::InvalidChunkSize);
        }
        let flat_err = || {
            Error::InvalidOperation(
                "cannot partition a frame with hierarchical axis labels".to_string(),
            )
        };
        let vector = match part_axis {
            Axis::Rows => frame.row_index(),
            Axis::Columns => frame.column_index(),
        };
        let vector_len = vector.as_flat().ok_or_else(flat_err)?.len();
        if vector_len == 0 {
            return Err(Error::EmptyData(
                "cannot partition a frame with an empty axis".to_string(),
            ));
        }

        let mut tree = Vec::new();
        let mut partitions = Vec::new();
        let mut start = 0;
        while start < vector_len {
            let end = (start + chunksize).min(vector_len);
            let chunk = match part_axis {
                Axis::Rows => frame.extract(&PosSelect::Range(start..end), &PosSelect::All)?,
                Axis::Columns => frame.extract(&PosSelect::All, &PosSelect::Range(start..end))?,
            }
            .into_frame()?;
            let local = match part_axis {
                Axis::Rows => chunk.row_index(),
                Axis::Columns => chunk.column_index(),
            }
            .as_flat()
            .ok_or_else(flat_err)?
            .clone();
            let label = match label_extractor {
                Some(extract) => extract(&local),
                None => local
                    .get_value(0)
                    .cloned()
                    .ok_or_else(|| Error::EmptyData("empty chunk".to_string()))?,
            };
            tree.push((label.clone(), local));
            partitions.push((label.clone(), chunk.with_name(Some(label.to_string()))));
            start = end;
        }

        let opposite = match part_axis {
            Axis::Rows => frame.column_index(),
            Axis::Columns => frame.row_index(),
        }
        .as_flat()
        .ok_or_else(flat_err)?
        .clone();

        let bus = Bus::from_frames(partitions, frame.name().map(|s| s.to_string()));
        let axis_map = AxisMap::from_tree(tree);
        Self::with_axis_state(bus, axis, retain_labels, Some(axis_map), Some(opposite))
    }

    /// Partition a frame per an [`EngineConfig`](crate::config::EngineConfig)
    pub fn from_frame_with(
        frame: &Frame<L, T>,
        config: &crate::config::EngineConfig,
    ) -> Result<Self> {
        Self::from_frame(
            frame,
            config.chunksize,
            config.partition_axis.as_usize(),
            config.retain_labels,
            None,
        )
    }

    // ------------------------------------------------------------------
    // deferred axis resolution

    /// One-way, idempotent transition from unresolved to resolved axis
    /// state; a failed resolution leaves the cache empty so a later call
    /// retries
    pub(crate) fn resolved(&self) -> Result<&ResolvedAxes<L>> {
        if let Some(axes) = self.resolved.get() {
            return Ok(axes);
        }

        let axis_map = match &self.axis_map_seed {
            Some(map) => map.clone(),
            None => AxisMap::from_bus(&self.bus, self.axis.as_usize())?,
        };
        let opposite = match &self.opposite_seed {
            Some(index) => index.clone(),
            None => {
                if self.bus.is_empty() {
                    return Err(Error::EmptyBus(
                        "cannot resolve axis labels over an empty bus".to_string(),
                    ));
                }
                // the first partition's schema stands in for all of them
                let first = self.bus.get_by_position(0)?;
                let labels = match self.axis {
                    Axis::Rows => first.column_index(),
                    Axis::Columns => first.row_index(),
                };
                labels
                    .as_flat()
                    .ok_or_else(|| {
                        Error::InvalidOperation(
                            "bus partitions must carry single-level axis labels".to_string(),
                        )
                    })?
                    .clone()
            }
        };

        let partitioned = if self.retain_labels {
            AxisLabels::Hier(axis_map.keys().clone())
        } else {
            AxisLabels::Flat(axis_map.inner_index())
        };
        let opposite_labels = AxisLabels::Flat(opposite.clone());
        let (index, columns) = match self.axis {
            Axis::Rows => (partitioned, opposite_labels),
            Axis::Columns => (opposite_labels, partitioned),
        };

        let axes = ResolvedAxes {
            axis_map,
            opposite,
            index,
            columns,
        };
        Ok(self.resolved.get_or_init(|| axes))
    }

    // ------------------------------------------------------------------
    // accessors

    /// The partitioned axis (0 rows, 1 columns)
    pub fn partition_axis(&self) -> usize {
        self.axis.as_usize()
    }

    pub(crate) fn partition_axis_enum(&self) -> Axis {
        self.axis
    }

    /// Whether the partitioned axis keeps its partition label level
    pub fn retain_labels(&self) -> bool {
        self.retain_labels
    }

    /// The underlying bus
    pub fn bus(&self) -> &Bus<L, T> {
        &self.bus
    }

    /// The virtual frame's name (the bus's name)
    pub fn name(&self) -> Option<&str> {
        self.bus.name()
    }

    /// Copy with a new name, sharing partitions and any resolved axis state
    pub fn rename(&self, name: Option<String>) -> Self {
        let (axis_map_seed, opposite_seed) = match self.resolved.get() {
            Some(axes) => (Some(axes.axis_map.clone()), Some(axes.opposite.clone())),
            None => (self.axis_map_seed.clone(), self.opposite_seed.clone()),
        };
        Self {
            bus: self.bus.rename(name),
            axis: self.axis,
            retain_labels: self.retain_labels,
            axis_map_seed,
            opposite_seed,
            resolved: OnceCell::new(),
        }
    }

    /// Row axis labels
    pub fn index(&self) -> Result<&AxisLabels<L>> {
        Ok(&self.resolved()?.index)
    }

    /// Column axis labels
    pub fn columns(&self) -> Result<&AxisLabels<L>> {
        Ok(&self.resolved()?.columns)
    }

    /// Number of dimensions; always 2
    pub fn ndim(&self) -> usize {
        2
    }

    /// (rows, cols) of the logical table
    pub fn shape(&self) -> Result<(usize, usize)> {
        let axes = self.resolved()?;
        Ok((axes.index.len(), axes.columns.len()))
    }

    /// Element count of the logical table
    pub fn size(&self) -> Result<usize> {
        let (rows, cols) = self.shape()?;
        Ok(rows * cols)
    }

    /// Total buffer bytes across all partitions; forces a full load
    pub fn nbytes(&self) -> Result<usize> {
        self.resolved()?;
        let mut total = 0;
        for item in self.bus.iter() {
            let (_, partition) = item?;
            total += partition.nbytes();
        }
        Ok(total)
    }

    // ------------------------------------------------------------------
    // dictionary-like interface over column labels

    /// Iterator of column labels
    pub fn keys(&self) -> Result<impl Iterator<Item = Label<L>> + '_> {
        Ok(self.resolved()?.columns.iter_labels())
    }

    /// Iterator of column labels, same as [`VirtualFrame::keys`]
    pub fn iter_keys(&self) -> Result<impl Iterator<Item = Label<L>> + '_> {
        self.keys()
    }

    /// Inclusion of a label in the column labels
    pub fn contains(&self, key: &Label<L>) -> Result<bool> {
        Ok(self.resolved()?.columns.contains(key))
    }

    /// The column at a key, or `None` when the key is absent
    pub fn get(&self, key: &Label<L>) -> Result<Option<Series<L, T>>> {
        let pos = match self.resolved()?.columns.get_loc(key) {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let extracted = self.extract(&PosSelect::All, &PosSelect::At(pos))?;
        Ok(Some(extracted.into_series()?))
    }

    /// Iterator of (column label, column series) pairs
    ///
    /// Delegates to series iteration along axis 0, so it is only
    /// supported when partitions stack horizontally.
    pub fn items(
        &self,
    ) -> Result<impl Iterator<Item = Result<(Label<L>, Series<L, T>)>> + '_> {
        self.iter_series_items(0)
    }

    // ------------------------------------------------------------------
    // materialization

    /// Materialize the whole logical table as one frame
    pub fn to_frame(&self) -> Result<Frame<L, T>> {
        self.extract(&PosSelect::All, &PosSelect::All)?.into_frame()
    }

    /// Dense row-major values of the whole logical table
    pub fn values(&self) -> Result<Vec<T>> {
        Ok(self.to_frame()?.values().to_vec())
    }
}

impl<L, T> VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone + Display,
{
    /// Render the materialized table
    pub fn display(&self) -> Result<String> {
        Ok(self.to_frame()?.to_string())
    }
}
