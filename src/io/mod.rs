//! CSV-backed partition storage
//!
//! One CSV file per partition label in a flat directory: the header row
//! carries the column labels (first cell is the row-label column), each
//! record carries a row label followed by that row's values. Partitions
//! are reached strictly through a [`Bus`]; this module issues no other
//! I/O.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::bus::{Bus, PartitionSource};
use crate::core::error::{Error, Result};
use crate::core::index::Index;
use crate::frame::Frame;

/// A directory of `<label>.csv` partition files
#[derive(Debug, Clone)]
pub struct CsvPartitionSource {
    dir: PathBuf,
}

impl CsvPartitionSource {
    /// Create a source over a directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Partition labels stored in the directory, sorted for a stable
    /// bus order
    pub fn labels(&self) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                labels.push(stem.to_string());
            }
        }
        labels.sort();
        Ok(labels)
    }

    /// Build a lazily-loading bus over every partition in the directory
    pub fn bus(&self, name: Option<String>) -> Result<Bus<String, String>> {
        let labels = self.labels()?;
        Ok(Bus::from_source(labels, Arc::new(self.clone()), name))
    }

    fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", label))
    }
}

impl PartitionSource<String, String> for CsvPartitionSource {
    fn load(&self, label: &String) -> Result<Frame<String, String>> {
        let path = self.path_for(label);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&path)?;

        let headers = reader.headers()?.clone();
        let columns: Vec<String> = headers.iter().skip(1).map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut fields = record.iter();
            let row_label = fields.next().ok_or_else(|| {
                Error::ParseValue(format!("empty record in {}", path.display()))
            })?;
            rows.push(row_label.to_string());
            let mut count = 0;
            for field in fields {
                values.push(field.to_string());
                count += 1;
            }
            if count != columns.len() {
                return Err(Error::LengthMismatch {
                    expected: columns.len(),
                    actual: count,
                });
            }
        }

        Frame::new(Index::new(rows), Index::new(columns), values)
    }
}

/// Write a frame as one partition file
pub fn write_frame_csv<P: AsRef<Path>>(frame: &Frame<String, String>, path: P) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = Vec::with_capacity(frame.cols() + 1);
    header.push(String::new());
    for label in frame.column_index().iter_labels() {
        header.push(label.to_string());
    }
    writer.write_record(&header)?;

    for (pos, label) in frame.row_index().iter_labels().enumerate() {
        let mut record = Vec::with_capacity(frame.cols() + 1);
        record.push(label.to_string());
        if let Some(row) = frame.row(pos) {
            record.extend(row);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
