use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

// ---------------------------------------------------------------------------
// NotesIndex – filename → description lookup
// ---------------------------------------------------------------------------

/// The experimenter-maintained notes file relating the cryptic filenames
/// assigned by the acquisition software to what was actually measured.
///
/// The file may not exist, and it may not cover every run in the
/// directory. A missing or unreadable file is the explicit [`Absent`]
/// state: every lookup misses and the whole directory falls back to the
/// default label. Lookups use exact filename equality.
///
/// [`Absent`]: NotesIndex::Absent
#[derive(Debug, Clone)]
pub enum NotesIndex {
    /// No notes file could be read for this directory.
    Absent,
    /// Exact filename → description.
    Loaded(BTreeMap<String, String>),
}

impl NotesIndex {
    /// Read a `filename,description` CSV. Never fatal: a missing or
    /// malformed file degrades to [`NotesIndex::Absent`] with a warning.
    pub fn load(path: &Path) -> NotesIndex {
        match read_notes(path) {
            Ok(entries) => NotesIndex::Loaded(entries),
            Err(err) => {
                warn!("no notes for this directory ({}): {err:#}", path.display());
                NotesIndex::Absent
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, NotesIndex::Absent)
    }

    /// Number of known filenames (0 when absent).
    pub fn len(&self) -> usize {
        match self {
            NotesIndex::Absent => 0,
            NotesIndex::Loaded(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Description for `filename`, by exact equality. Always `None` when
    /// the index is absent.
    pub fn description_for(&self, filename: &str) -> Option<&str> {
        match self {
            NotesIndex::Absent => None,
            NotesIndex::Loaded(entries) => entries.get(filename).map(String::as_str),
        }
    }
}

fn read_notes(path: &Path) -> Result<BTreeMap<String, String>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers().context("reading notes headers")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("notes file missing '{name}' column"))
    };
    let f_idx = column("filename")?;
    let d_idx = column("description")?;

    let mut entries = BTreeMap::new();
    for result in reader.records() {
        let record = result.context("reading notes row")?;
        let filename = record.get(f_idx).unwrap_or("").trim().to_string();
        if filename.is_empty() {
            continue;
        }
        let description = record.get(d_idx).unwrap_or("").trim().to_string();
        if entries.contains_key(&filename) {
            warn!("duplicate notes entry for '{filename}', keeping the first");
            continue;
        }
        entries.insert(filename, description);
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let notes = NotesIndex::load(&dir.path().join("nope.csv"));
        assert!(notes.is_absent());
        assert_eq!(notes.description_for("run.csv"), None);
    }

    #[test]
    fn file_without_expected_columns_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(&path, "file,comment\na.csv,hello\n").unwrap();
        assert!(NotesIndex::load(&path).is_absent());
    }

    #[test]
    fn lookup_is_exact_filename_equality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(
            &path,
            "filename,description\nrun_003.csv, field test\n",
        )
        .unwrap();

        let notes = NotesIndex::load(&path);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.description_for("run_003.csv"), Some("field test"));
        // near-collision with run_003.csv, but not an entry
        assert_eq!(notes.description_for("run_03.csv"), None);
    }

    #[test]
    fn cells_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(
            &path,
            "filename,description\n 2018_2_16_10_3_48.csv , First -3V bias test with no ops \n",
        )
        .unwrap();

        let notes = NotesIndex::load(&path);
        assert_eq!(
            notes.description_for("2018_2_16_10_3_48.csv"),
            Some("First -3V bias test with no ops")
        );
    }

    #[test]
    fn duplicate_filename_keeps_the_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(
            &path,
            "filename,description\na.csv,first\na.csv,second\n",
        )
        .unwrap();

        let notes = NotesIndex::load(&path);
        assert_eq!(notes.description_for("a.csv"), Some("first"));
    }
}
