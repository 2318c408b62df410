use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::loader::load_record;
use super::model::{Collection, DEFAULT_LABEL};
use crate::notes::NotesIndex;

// ---------------------------------------------------------------------------
// Labeling strategy
// ---------------------------------------------------------------------------

/// Strategy for choosing a label when a run is found in the notes index.
///
/// Injected into [`build_collection`] so the builder is independent of any
/// particular input channel (console, batch default, test stub). Runs
/// *not* found in the notes never reach the labeler; they get
/// [`DEFAULT_LABEL`] directly.
pub trait Labeler {
    /// Return a label for `filename`, given its notes `description`.
    /// The label is stored as returned, with no validation.
    fn label_for(&mut self, filename: &str, description: &str) -> String;
}

/// Interactive strategy: show the filename and its note, then read one
/// line from stdin. This is the only blocking interaction in the system.
pub struct ConsolePrompt;

impl Labeler for ConsolePrompt {
    fn label_for(&mut self, filename: &str, description: &str) -> String {
        println!("\n{filename}");
        println!("{description}");
        print!("Provide a short label for this data:  ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
            Err(err) => {
                warn!("could not read label for {filename}: {err}");
                DEFAULT_LABEL.to_string()
            }
        }
    }
}

/// Non-interactive strategy: reuse the note's description verbatim.
pub struct UseDescription;

impl Labeler for UseDescription {
    fn label_for(&mut self, _filename: &str, description: &str) -> String {
        description.to_string()
    }
}

// ---------------------------------------------------------------------------
// Directory scan
// ---------------------------------------------------------------------------

/// Scan `dir` for raw run files and build the labeled collection.
///
/// Every `.csv` file except the notes file itself is considered, in
/// sorted filename order. Files present in the notes index are labeled
/// via `labeler`; all others get [`DEFAULT_LABEL`]. A file that fails to
/// load is logged and skipped; one bad file never aborts the scan. Only
/// a failure to read the directory itself is fatal.
///
/// Returns the notes index (possibly absent) together with the ordered
/// collection.
pub fn build_collection(
    dir: &Path,
    notes_name: &str,
    labeler: &mut dyn Labeler,
) -> Result<(NotesIndex, Collection)> {
    let notes = NotesIndex::load(&dir.join(notes_name));

    let mut filenames: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".csv") && name.as_str() != notes_name)
        .collect();
    filenames.sort();

    let mut collection = Collection::default();
    for filename in &filenames {
        let label = match notes.description_for(filename) {
            Some(description) => labeler.label_for(filename, description),
            None => DEFAULT_LABEL.to_string(),
        };
        match load_record(dir, filename, &label) {
            Ok(record) => {
                debug!("loaded {filename} as '{label}'");
                collection.records.push(record);
            }
            Err(err) => warn!("skipping {filename}: {err:#}"),
        }
    }

    Ok((notes, collection))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
