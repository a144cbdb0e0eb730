//! Axis iteration for virtual frames
//!
//! Cross-sections stream one partition at a time, in bus order, without
//! prefetch. Only the direction whose cross-sections live wholly inside
//! single partitions is supported; the orthogonal direction would span
//! many partitions per cross-section and is rejected up front.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use crate::bus::Bus;
use crate::core::axis::Axis;
use crate::core::error::{Error, Result};
use crate::core::hier_index::Label;
use crate::frame::Frame;
use crate::series::Series;
use crate::virtual_frame::VirtualFrame;

/// Lazy cross-section iterator: raw value arrays, partition by partition
///
/// A fresh, single-pass sequence per invocation; restart by re-invoking
/// the accessor. A partition fetch failure yields one `Err` and ends the
/// sequence.
pub struct AxisArrays<'a, L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    bus: &'a Bus<L, T>,
    yield_rows: bool,
    part_pos: usize,
    current: Option<Arc<Frame<L, T>>>,
    cross_pos: usize,
    failed: bool,
}

impl<L, T> Iterator for AxisArrays<'_, L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(frame) = &self.current {
                let count = if self.yield_rows {
                    frame.rows()
                } else {
                    frame.cols()
                };
                if self.cross_pos < count {
                    let values = if self.yield_rows {
                        frame.row(self.cross_pos)
                    } else {
                        frame.column(self.cross_pos)
                    };
                    self.cross_pos += 1;
                    return values.map(Ok);
                }
                self.current = None;
            }
            if self.part_pos >= self.bus.len() {
                return None;
            }
            match self.bus.get_by_position(self.part_pos) {
                Ok(frame) => {
                    self.current = Some(frame);
                    self.cross_pos = 0;
                    self.part_pos += 1;
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<L, T> VirtualFrame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Whether `axis` names a streamable direction, resolving axis state
    /// first
    ///
    /// `axis` 0 produces one value per column, 1 one value per row; the
    /// direction orthogonal to the partitioning is rejected.
    fn check_iteration(&self, axis: usize) -> Result<bool> {
        self.resolved()?;
        let yield_rows = match axis {
            1 => true,
            0 => false,
            other => return Err(Error::InvalidAxis(other)),
        };
        let supported = match self.partition_axis_enum() {
            Axis::Rows => yield_rows,
            Axis::Columns => !yield_rows,
        };
        if !supported {
            return Err(Error::UnsupportedIterationDirection);
        }
        Ok(yield_rows)
    }

    /// Iterator of raw value arrays drawn from columns (axis 0) or rows
    /// (axis 1)
    pub fn iter_array(&self, axis: usize) -> Result<AxisArrays<'_, L, T>> {
        let yield_rows = self.check_iteration(axis)?;
        Ok(AxisArrays {
            bus: self.bus(),
            yield_rows,
            part_pos: 0,
            current: None,
            cross_pos: 0,
            failed: false,
        })
    }

    /// Iterator of (label, raw value array) pairs, labels drawn from the
    /// unified axis labels in position order
    pub fn iter_array_items(
        &self,
        axis: usize,
    ) -> Result<impl Iterator<Item = Result<(Label<L>, Vec<T>)>> + '_> {
        let arrays = self.iter_array(axis)?;
        let axes = self.resolved()?;
        let labels = if axis == 1 { &axes.index } else { &axes.columns };
        Ok(labels
            .iter_labels()
            .zip(arrays)
            .map(|(label, values)| values.map(|v| (label, v))))
    }

    /// Iterator of labeled series drawn from columns (axis 0) or rows
    /// (axis 1); each series is indexed by the unified labels of the
    /// opposite axis and named after its own label
    pub fn iter_series(
        &self,
        axis: usize,
    ) -> Result<impl Iterator<Item = Result<Series<L, T>>> + '_> {
        let items = self.iter_array_items(axis)?;
        let axes = self.resolved()?;
        let opposite = if axis == 1 {
            axes.columns.clone()
        } else {
            axes.index.clone()
        };
        Ok(items.map(move |item| {
            item.and_then(|(label, values)| {
                Series::new(opposite.clone(), values, Some(label.to_string()))
            })
        }))
    }

    /// Iterator of (label, labeled series) pairs
    pub fn iter_series_items(
        &self,
        axis: usize,
    ) -> Result<impl Iterator<Item = Result<(Label<L>, Series<L, T>)>> + '_> {
        let series = self.iter_series(axis)?;
        let axes = self.resolved()?;
        let labels = if axis == 1 { &axes.index } else { &axes.columns };
        Ok(labels
            .iter_labels()
            .zip(series)
            .map(|(label, s)| s.map(|s| (label, s))))
    }
}
