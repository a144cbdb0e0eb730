//! Frame module - labeled two-dimensional data
//!
//! A Frame is a dense, row-major table with labeled rows and columns. It is
//! the partition type held by a [`Bus`](crate::bus::Bus): immutable once
//! built, extractable by position on both axes, and relabelable with an
//! outer partition label.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::core::axis::Axis;
use crate::core::error::{Error, Result};
use crate::core::hier_index::AxisLabels;
use crate::core::index::Index;
use crate::core::select::PosSelect;
use crate::series::Series;

const DISPLAY_MAX_ROWS: usize = 10;

/// Frame struct: dense row-major 2-dimensional data with labeled axes
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Row axis labels
    row_labels: AxisLabels<L>,
    /// Column axis labels
    column_labels: AxisLabels<L>,
    /// Dense values buffer, row-major, `rows * cols` long
    values: Vec<T>,
    /// Optional frame name
    name: Option<String>,
}

/// Result of a positional extraction: a bare element when both selectors
/// are scalar, a Series when exactly one is, a Frame otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    Elem(T),
    Series(Series<L, T>),
    Frame(Frame<L, T>),
}

impl<L, T> Extracted<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Unwrap a frame-shaped extraction
    pub fn into_frame(self) -> Result<Frame<L, T>> {
        match self {
            Extracted::Frame(f) => Ok(f),
            other => Err(Error::InvalidOperation(format!(
                "extraction produced {}, not a frame",
                other.kind()
            ))),
        }
    }

    /// Unwrap a series-shaped extraction
    pub fn into_series(self) -> Result<Series<L, T>> {
        match self {
            Extracted::Series(s) => Ok(s),
            other => Err(Error::InvalidOperation(format!(
                "extraction produced {}, not a series",
                other.kind()
            ))),
        }
    }

    /// Unwrap a scalar extraction
    pub fn into_elem(self) -> Result<T> {
        match self {
            Extracted::Elem(v) => Ok(v),
            other => Err(Error::InvalidOperation(format!(
                "extraction produced {}, not an element",
                other.kind()
            ))),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Extracted::Elem(_) => "an element",
            Extracted::Series(_) => "a series",
            Extracted::Frame(_) => "a frame",
        }
    }
}

impl<L, T> Frame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Create a new Frame over flat row and column labels
    ///
    /// # Errors
    /// Returns `Error::ShapeMismatch` if the buffer length is not
    /// `rows * cols`
    pub fn new(row_index: Index<L>, column_index: Index<L>, values: Vec<T>) -> Result<Self> {
        Self::from_axes(
            AxisLabels::Flat(row_index),
            AxisLabels::Flat(column_index),
            values,
        )
    }

    /// Create a new Frame over arbitrary axis labels
    pub fn from_axes(
        row_labels: AxisLabels<L>,
        column_labels: AxisLabels<L>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_labels.len() * column_labels.len() != values.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} rows x {} cols requires {} values, got {}",
                row_labels.len(),
                column_labels.len(),
                row_labels.len() * column_labels.len(),
                values.len()
            )));
        }
        Ok(Self {
            row_labels,
            column_labels,
            values,
            name: None,
        })
    }

    /// Copy the Frame with a new name
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Get the frame name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.column_labels.len()
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Bytes held by the dense values buffer
    pub fn nbytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<T>()
    }

    /// Row axis labels
    pub fn row_index(&self) -> &AxisLabels<L> {
        &self.row_labels
    }

    /// Column axis labels
    pub fn column_index(&self) -> &AxisLabels<L> {
        &self.column_labels
    }

    /// The dense row-major values buffer
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Get the element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.values.get(row * self.cols() + col)
    }

    /// The values of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<T>> {
        if row >= self.rows() {
            return None;
        }
        let cols = self.cols();
        Some(self.values[row * cols..(row + 1) * cols].to_vec())
    }

    /// The values of one column, in row order
    pub fn column(&self, col: usize) -> Option<Vec<T>> {
        if col >= self.cols() {
            return None;
        }
        let cols = self.cols();
        Some(
            (0..self.rows())
                .map(|r| self.values[r * cols + col].clone())
                .collect(),
        )
    }

    /// Positional compound extraction with standard dimensionality
    /// reduction: two scalar selectors produce an element, one produces a
    /// Series, none produces a Frame
    pub fn extract(&self, row: &PosSelect, col: &PosSelect) -> Result<Extracted<L, T>> {
        let row_pos = row.positions(self.rows())?;
        let col_pos = col.positions(self.cols())?;
        let cols = self.cols();

        match (row.is_scalar(), col.is_scalar()) {
            (true, true) => {
                let value = self.values[row_pos[0] * cols + col_pos[0]].clone();
                Ok(Extracted::Elem(value))
            }
            (true, false) => {
                let r = row_pos[0];
                let values: Vec<T> = col_pos
                    .iter()
                    .map(|&c| self.values[r * cols + c].clone())
                    .collect();
                let name = self.row_labels.label_at(r).map(|l| l.to_string());
                Ok(Extracted::Series(Series::new(
                    self.column_labels.take(&col_pos)?,
                    values,
                    name,
                )?))
            }
            (false, true) => {
                let c = col_pos[0];
                let values: Vec<T> = row_pos
                    .iter()
                    .map(|&r| self.values[r * cols + c].clone())
                    .collect();
                let name = self.column_labels.label_at(c).map(|l| l.to_string());
                Ok(Extracted::Series(Series::new(
                    self.row_labels.take(&row_pos)?,
                    values,
                    name,
                )?))
            }
            (false, false) => {
                let mut values = Vec::with_capacity(row_pos.len() * col_pos.len());
                for &r in &row_pos {
                    for &c in &col_pos {
                        values.push(self.values[r * cols + c].clone());
                    }
                }
                let frame = Frame::from_axes(
                    self.row_labels.take(&row_pos)?,
                    self.column_labels.take(&col_pos)?,
                    values,
                )?
                .with_name(self.name.clone());
                Ok(Extracted::Frame(frame))
            }
        }
    }

    /// Return a copy with an outer label level added to one axis
    pub fn add_outer_label(&self, outer: &L, on_rows: bool) -> Result<Self> {
        let (row_labels, column_labels) = if on_rows {
            (self.row_labels.add_outer(outer)?, self.column_labels.clone())
        } else {
            (self.row_labels.clone(), self.column_labels.add_outer(outer)?)
        };
        Ok(Self {
            row_labels,
            column_labels,
            values: self.values.clone(),
            name: self.name.clone(),
        })
    }

    /// Concatenate several Frames along an axis, preserving input order
    ///
    /// The opposite axis must agree in length across parts; its labels are
    /// taken from the first part and not validated further.
    pub fn concat(parts: &[Self], axis: Axis) -> Result<Self> {
        let first = parts
            .first()
            .ok_or_else(|| Error::EmptyData("no frames to concatenate".to_string()))?;
        match axis {
            Axis::Rows => {
                let cols = first.cols();
                let mut values = Vec::new();
                for part in parts {
                    if part.cols() != cols {
                        return Err(Error::LengthMismatch {
                            expected: cols,
                            actual: part.cols(),
                        });
                    }
                    values.extend(part.values.iter().cloned());
                }
                let row_labels = AxisLabels::concat(parts.iter().map(|p| &p.row_labels))?;
                Ok(Self {
                    row_labels,
                    column_labels: first.column_labels.clone(),
                    values,
                    name: first.name.clone(),
                })
            }
            Axis::Columns => {
                let rows = first.rows();
                let mut total_cols = 0;
                for part in parts {
                    if part.rows() != rows {
                        return Err(Error::LengthMismatch {
                            expected: rows,
                            actual: part.rows(),
                        });
                    }
                    total_cols += part.cols();
                }
                let mut values = Vec::with_capacity(rows * total_cols);
                for r in 0..rows {
                    for part in parts {
                        let cols = part.cols();
                        values.extend(part.values[r * cols..(r + 1) * cols].iter().cloned());
                    }
                }
                let column_labels = AxisLabels::concat(parts.iter().map(|p| &p.column_labels))?;
                Ok(Self {
                    row_labels: first.row_labels.clone(),
                    column_labels,
                    values,
                    name: first.name.clone(),
                })
            }
        }
    }
}

impl<L, T> Display for Frame<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "Frame: {}", name)?,
            None => writeln!(f, "Frame")?,
        }
        write!(f, "  ")?;
        for label in self.column_labels.iter_labels() {
            write!(f, "  {}", label)?;
        }
        writeln!(f)?;
        let max_show = self.rows().min(DISPLAY_MAX_ROWS);
        for r in 0..max_show {
            if let Some(label) = self.row_labels.label_at(r) {
                write!(f, "  {}", label)?;
            }
            for c in 0..self.cols() {
                write!(f, "  {}", self.values[r * self.cols() + c])?;
            }
            writeln!(f)?;
        }
        if self.rows() > max_show {
            writeln!(f, "  ...")?;
            writeln!(f, "  {} rows total", self.rows())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame<&'static str, i64> {
        Frame::new(
            Index::new(vec!["r0", "r1", "r2"]),
            Index::new(vec!["c0", "c1"]),
            vec![1, 2, 3, 4, 5, 6],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_validation() {
        let bad = Frame::new(
            Index::new(vec!["r0"]),
            Index::new(vec!["c0", "c1"]),
            vec![1],
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_extract_reductions() {
        let f = sample();
        let elem = f
            .extract(&PosSelect::At(1), &PosSelect::At(1))
            .unwrap()
            .into_elem()
            .unwrap();
        assert_eq!(elem, 4);

        let row = f
            .extract(&PosSelect::At(2), &PosSelect::All)
            .unwrap()
            .into_series()
            .unwrap();
        assert_eq!(row.values(), &[5, 6]);
        assert_eq!(row.name(), Some("r2"));

        let col = f
            .extract(&PosSelect::All, &PosSelect::At(0))
            .unwrap()
            .into_series()
            .unwrap();
        assert_eq!(col.values(), &[1, 3, 5]);
    }

    #[test]
    fn test_extract_mask_and_range() {
        let f = sample();
        let sub = f
            .extract(
                &PosSelect::Mask(vec![true, false, true]),
                &PosSelect::Range(0..1),
            )
            .unwrap()
            .into_frame()
            .unwrap();
        assert_eq!(sub.shape(), (2, 1));
        assert_eq!(sub.values(), &[1, 5]);
    }

    #[test]
    fn test_concat_rows_preserves_order() {
        let top = sample();
        let bottom = Frame::new(
            Index::new(vec!["r3"]),
            Index::new(vec!["c0", "c1"]),
            vec![7, 8],
        )
        .unwrap();
        let joined = Frame::concat(&[top, bottom], Axis::Rows).unwrap();
        assert_eq!(joined.shape(), (4, 2));
        assert_eq!(joined.values(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_concat_columns_interleaves_rows() {
        let left = sample();
        let right = Frame::new(
            Index::new(vec!["r0", "r1", "r2"]),
            Index::new(vec!["c2"]),
            vec![9, 10, 11],
        )
        .unwrap();
        let joined = Frame::concat(&[left, right], Axis::Columns).unwrap();
        assert_eq!(joined.shape(), (3, 3));
        assert_eq!(joined.values(), &[1, 2, 9, 3, 4, 10, 5, 6, 11]);
    }

    #[test]
    fn test_add_outer_label() {
        let f = sample().add_outer_label(&"p0", true).unwrap();
        assert!(f.row_index().as_hier().is_some());
        assert_eq!(f.column_index().len(), 2);
    }
}
