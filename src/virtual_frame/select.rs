//! Selection and extraction for virtual frames
//!
//! Positional and label selections on the logical table are translated
//! into per-partition sub-selections: the selector on the partitioned axis
//! becomes a boolean vector over the axis map, each touched partition
//! extracts with its span of that vector, and the partial results are
//! relabeled and merged in touched order. A selection that touches exactly
//! one partition returns that partition's extraction unchanged.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::core::axis::Axis;
use crate::core::error::{Error, Result};
use crate::core::hier_index::{AxisLabels, HierIndex};
use crate::core::index::Index;
use crate::core::select::{LabelSelect, PosSelect};
use crate::frame::{Extracted, Frame};
use crate::series::Series;
use crate::virtual_frame::VirtualFrame;

impl<L, T> VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Positional compound selection
    pub fn iloc(&self, row: PosSelect, col: PosSelect) -> Result<Extracted<L, T>> {
        self.extract(&row, &col)
    }

    /// Positional row selection, keeping all columns
    pub fn iloc_rows(&self, row: PosSelect) -> Result<Extracted<L, T>> {
        self.extract(&row, &PosSelect::All)
    }

    /// Label-based compound selection
    pub fn loc(&self, row: LabelSelect<L>, col: LabelSelect<L>) -> Result<Extracted<L, T>> {
        let axes = self.resolved()?;
        let row_key = row.resolve(&axes.index)?;
        let col_key = col.resolve(&axes.columns)?;
        self.extract(&row_key, &col_key)
    }

    /// Label-based row selection, keeping all columns
    pub fn loc_rows(&self, row: LabelSelect<L>) -> Result<Extracted<L, T>> {
        self.loc(row, LabelSelect::All)
    }

    /// Column-only direct selection by label, keeping all rows
    pub fn col(&self, key: LabelSelect<L>) -> Result<Extracted<L, T>> {
        self.loc(LabelSelect::All, key)
    }

    /// Extraction over already-positional selectors
    pub(crate) fn extract(
        &self,
        row_key: &PosSelect,
        col_key: &PosSelect,
    ) -> Result<Extracted<L, T>> {
        let axes = self.resolved()?;
        let axis = self.partition_axis_enum();
        let (sel_key, passthrough) = match axis {
            Axis::Rows => (row_key, col_key),
            Axis::Columns => (col_key, row_key),
        };
        let reduces = sel_key.is_scalar();

        let map_len = axes.axis_map.len();
        let sel_positions = sel_key.positions(map_len)?;
        let mut sel_mask = vec![false; map_len];
        for &pos in &sel_positions {
            sel_mask[pos] = true;
        }

        let touched = axes.axis_map.owners_for(&sel_positions)?;
        if touched.is_empty() {
            return self.extract_empty(passthrough, axes);
        }

        let mut parts: Vec<Extracted<L, T>> = Vec::with_capacity(touched.len());
        for owner in &touched {
            let partition = self.bus().get_by_label(owner)?;
            let span = axes
                .axis_map
                .span_of(owner)
                .ok_or_else(|| Error::PartitionNotFound(owner.to_string()))?;
            let sub_sel = PosSelect::Mask(sel_mask[span].to_vec());

            let mut part = match axis {
                Axis::Rows => partition.extract(&sub_sel, passthrough)?,
                Axis::Columns => partition.extract(passthrough, &sub_sel)?,
            };
            if self.retain_labels() {
                part = match part {
                    Extracted::Frame(f) => {
                        Extracted::Frame(f.add_outer_label(owner, axis == Axis::Rows)?)
                    }
                    Extracted::Series(s) => Extracted::Series(s.add_outer_label(owner)?),
                    elem => elem,
                };
            }
            if reduces {
                part = match part {
                    Extracted::Frame(f) => match axis {
                        Axis::Rows => f.extract(&PosSelect::At(0), &PosSelect::All)?,
                        Axis::Columns => f.extract(&PosSelect::All, &PosSelect::At(0))?,
                    },
                    Extracted::Series(s) => {
                        let size = s.len();
                        Extracted::Elem(s.get(0).cloned().ok_or(
                            Error::PositionOutOfBounds { index: 0, size },
                        )?)
                    }
                    elem => elem,
                };
            }
            parts.push(part);
        }

        if parts.len() == 1 {
            // single partition touched: its result passes through unmerged
            return parts
                .pop()
                .ok_or_else(|| Error::EmptyData("no extraction parts".to_string()));
        }
        self.merge(parts)
    }

    /// Merge multi-partition partial results along the partitioned axis,
    /// in touched order
    fn merge(&self, parts: Vec<Extracted<L, T>>) -> Result<Extracted<L, T>> {
        if parts.iter().all(|p| matches!(p, Extracted::Series(_))) {
            let mut series = Vec::with_capacity(parts.len());
            for part in parts {
                series.push(part.into_series()?);
            }
            return Ok(Extracted::Series(Series::concat(&series)?));
        }
        if parts.iter().all(|p| matches!(p, Extracted::Frame(_))) {
            let mut frames = Vec::with_capacity(parts.len());
            for part in parts {
                frames.push(part.into_frame()?);
            }
            return Ok(Extracted::Frame(Frame::concat(
                &frames,
                self.partition_axis_enum(),
            )?));
        }
        Err(Error::InvalidOperation(
            "cannot merge extraction parts of differing shapes".to_string(),
        ))
    }

    /// A selection whose partitioned-axis key covers no positions: an
    /// empty-shaped result whose partitioned axis has zero-length labels
    /// of the policy's label type
    fn extract_empty(
        &self,
        passthrough: &PosSelect,
        axes: &super::ResolvedAxes<L>,
    ) -> Result<Extracted<L, T>> {
        let empty: AxisLabels<L> = if self.retain_labels() {
            AxisLabels::Hier(HierIndex::new(Vec::new()))
        } else {
            AxisLabels::Flat(Index::new(Vec::new()))
        };
        if passthrough.is_scalar() {
            return Ok(Extracted::Series(Series::new(empty, Vec::new(), None)?));
        }
        let passthrough_pos = passthrough.positions(axes.opposite.len())?;
        let opposite = AxisLabels::Flat(axes.opposite.take(&passthrough_pos)?);
        let frame = match self.partition_axis_enum() {
            Axis::Rows => Frame::from_axes(empty, opposite, Vec::new())?,
            Axis::Columns => Frame::from_axes(opposite, empty, Vec::new())?,
        };
        Ok(Extracted::Frame(frame))
    }
}
