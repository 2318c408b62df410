use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Sample – one acquisition row
// ---------------------------------------------------------------------------

/// A single acquisition row: time in seconds, voltage in volts,
/// current in amperes. Canonical column names are `t_s`, `v`, `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t_s: f64,
    pub v: f64,
    pub i: f64,
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one run's samples plus its identity
// ---------------------------------------------------------------------------

/// Label assigned to a run that has no entry in the notes index.
pub const DEFAULT_LABEL: &str = "not in notes";

/// One measurement run. `filename` and `label` are fixed at construction;
/// `samples` keeps the acquisition order and is never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Name of the raw file this run was loaded from.
    pub filename: String,
    /// User-chosen label; also the key under which the run is persisted.
    pub label: String,
    /// Samples in acquisition order.
    pub samples: Vec<Sample>,
}

// ---------------------------------------------------------------------------
// Collection – ordered list of records under active manipulation
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered list of records. Built once by the collection builder;
/// afterwards new collections are derived via [`Collection::slice`],
/// never by mutating an existing one's membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub records: Vec<MeasurementRecord>,
}

impl Collection {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Collection { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MeasurementRecord> {
        self.records.get(index)
    }

    /// Build a new collection from the records at `indices`, in the given
    /// order. Duplicates and reordering are allowed; any out-of-range
    /// index fails the whole call.
    pub fn slice(&self, indices: &[usize]) -> Result<Collection, CollectionError> {
        let mut records = Vec::with_capacity(indices.len());
        for &index in indices {
            let record = self
                .records
                .get(index)
                .ok_or(CollectionError::IndexOutOfRange {
                    index,
                    len: self.records.len(),
                })?;
            records.push(record.clone());
        }
        Ok(Collection { records })
    }

    /// (index, label, filename) triples for records whose index lies in
    /// `istart..=iend`. An `iend` of 0, or one below `istart`, means
    /// "through the end of the collection".
    pub fn entries(&self, istart: usize, iend: usize) -> Vec<(usize, &str, &str)> {
        let iend = if iend == 0 || iend < istart {
            self.records.len()
        } else {
            iend
        };
        self.records
            .iter()
            .enumerate()
            .filter(|(i, _)| *i >= istart && *i <= iend)
            .map(|(i, r)| (i, r.label.as_str(), r.filename.as_str()))
            .collect()
    }

    /// Human-readable listing of [`Collection::entries`], one line per
    /// record, so the notes can be connected to collection indices.
    pub fn listing(&self, istart: usize, iend: usize) -> String {
        let mut out = String::new();
        for (i, label, filename) in self.entries(istart, iend) {
            let _ = writeln!(out, "{i}   {label}   {filename}");
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, label: &str) -> MeasurementRecord {
        MeasurementRecord {
            filename: filename.to_string(),
            label: label.to_string(),
            samples: vec![Sample {
                t_s: 0.0,
                v: -3.0,
                i: 1e-6,
            }],
        }
    }

    fn collection(n: usize) -> Collection {
        Collection::new(
            (0..n)
                .map(|k| record(&format!("run_{k:03}.csv"), &format!("label {k}")))
                .collect(),
        )
    }

    #[test]
    fn slice_selects_by_index_in_given_order() {
        let c = collection(5);
        let s = c.slice(&[3, 0, 3]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.records[0], c.records[3]);
        assert_eq!(s.records[1], c.records[0]);
        assert_eq!(s.records[2], c.records[3]);
    }

    #[test]
    fn slice_does_not_mutate_the_source() {
        let c = collection(4);
        let before = c.clone();
        let _ = c.slice(&[1, 2]).unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn slice_out_of_range_is_an_error() {
        let c = collection(3);
        assert_eq!(
            c.slice(&[0, 3]),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn entries_range_is_inclusive_both_ends() {
        let c = collection(6);
        let listed: Vec<usize> = c.entries(2, 4).iter().map(|(i, _, _)| *i).collect();
        assert_eq!(listed, vec![2, 3, 4]);
    }

    #[test]
    fn entries_zero_iend_means_whole_collection() {
        let c = collection(4);
        assert_eq!(c.entries(0, 0).len(), 4);
    }

    #[test]
    fn entries_iend_below_istart_runs_to_the_end() {
        let c = collection(6);
        let listed: Vec<usize> = c.entries(4, 2).iter().map(|(i, _, _)| *i).collect();
        assert_eq!(listed, vec![4, 5]);
    }

    #[test]
    fn listing_shows_index_label_filename() {
        let c = collection(2);
        let text = c.listing(0, 0);
        assert!(text.contains("0   label 0   run_000.csv"));
        assert!(text.contains("1   label 1   run_001.csv"));
    }
}
