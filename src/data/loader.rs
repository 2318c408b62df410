use std::path::Path;

use anyhow::{Context, Result};

use super::model::{MeasurementRecord, Sample};

// ---------------------------------------------------------------------------
// Raw Keithley run file loader
// ---------------------------------------------------------------------------

/// Native column headers written by the Keithley acquisition software.
/// The layout is fixed; any extra columns in a run file are ignored.
const TIME_COL: &str = "Smu1_Time(1)(1)";
const VOLT_COL: &str = "Smu1_V(1)(1)";
const CURR_COL: &str = "Smu1_I(1)(1)";

/// Load one raw run file from `dir` into a [`MeasurementRecord`].
///
/// The native time/voltage/current columns are selected by header name and
/// renamed to the canonical `t_s` / `v` / `i`. The caller supplies the
/// label (resolved from the notes index or the default sentinel). A
/// missing column or an unparseable cell is an error; the caller decides
/// whether to skip the file or abort.
pub fn load_record(dir: &Path, filename: &str, label: &str) -> Result<MeasurementRecord> {
    let path = dir.join(filename);
    let mut reader =
        csv::Reader::from_path(&path).with_context(|| format!("opening {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("{filename}: reading CSV headers"))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("{filename}: missing column '{name}'"))
    };
    let t_idx = column(TIME_COL)?;
    let v_idx = column(VOLT_COL)?;
    let i_idx = column(CURR_COL)?;

    let mut samples = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{filename}: reading row {row_no}"))?;
        let cell = |idx: usize, name: &str| {
            record
                .get(idx)
                .unwrap_or("")
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{filename}: row {row_no}, column '{name}': not a number"))
        };
        samples.push(Sample {
            t_s: cell(t_idx, TIME_COL)?,
            v: cell(v_idx, VOLT_COL)?,
            i: cell(i_idx, CURR_COL)?,
        });
    }

    Ok(MeasurementRecord {
        filename: filename.to_string(),
        label: label.to_string(),
        samples,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
