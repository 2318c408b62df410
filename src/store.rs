use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::data::model::{Collection, MeasurementRecord};

// ---------------------------------------------------------------------------
// Persisted store – one keyed JSON container per curated collection
// ---------------------------------------------------------------------------

/// On-disk layout: label → record. Each record carries its own filename
/// and label, so a reloaded collection needs no external bookkeeping.
type StoreMap = BTreeMap<String, MeasurementRecord>;

/// Write every record into the store at `path`, keyed by its label.
///
/// Label collisions are deterministic last-write-wins (collection order)
/// and are surfaced with a warning naming both filenames. Write failures
/// are fatal.
pub fn save_collection(collection: &Collection, path: &Path) -> Result<()> {
    let mut map = StoreMap::new();
    for record in &collection.records {
        if let Some(previous) = map.insert(record.label.clone(), record.clone()) {
            warn!(
                "label '{}' written twice: overwriting {} with {}",
                record.label, previous.filename, record.filename
            );
        }
    }

    let json = serde_json::to_string_pretty(&map).context("serializing store")?;
    fs::write(path, json).with_context(|| format!("writing store {}", path.display()))?;
    info!(
        "saved {} labeled record(s) to {}",
        map.len(),
        path.display()
    );
    Ok(())
}

/// Read the store at `path` back into a collection, one record per key,
/// in the store's key order (sorted by label — not the original build
/// order). A missing or corrupt store is fatal.
pub fn load_collection(path: &Path) -> Result<Collection> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading store {}", path.display()))?;
    let map: StoreMap =
        serde_json::from_str(&text).with_context(|| format!("parsing store {}", path.display()))?;
    Ok(Collection::new(map.into_values().collect()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Sample;

    fn record(filename: &str, label: &str, i0: f64) -> MeasurementRecord {
        MeasurementRecord {
            filename: filename.to_string(),
            label: label.to_string(),
            samples: vec![
                Sample {
                    t_s: 0.0,
                    v: -3.0,
                    i: i0,
                },
                Sample {
                    t_s: 0.1,
                    v: -2.9,
                    i: i0 * 2.0,
                },
            ],
        }
    }

    #[test]
    fn save_then_load_round_trips_records_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp_rack_tests.json");

        let original = Collection::new(vec![
            record("2018_2_16_10_3_48.csv", "bias test", 1.5e-6),
            record("2018_2_16_10_8_24.csv", "no ops", 3.125e-9),
        ]);
        save_collection(&original, &path).unwrap();
        let reloaded = load_collection(&path).unwrap();

        assert_eq!(reloaded.len(), 2);
        for rec in &original.records {
            let back = reloaded
                .records
                .iter()
                .find(|r| r.label == rec.label)
                .unwrap();
            assert_eq!(back, rec);
        }
    }

    #[test]
    fn reload_order_is_sorted_by_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let original = Collection::new(vec![
            record("b.csv", "zeta", 1.0),
            record("a.csv", "alpha", 2.0),
        ]);
        save_collection(&original, &path).unwrap();
        let reloaded = load_collection(&path).unwrap();

        let labels: Vec<&str> = reloaded.records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["alpha", "zeta"]);
    }

    #[test]
    fn label_collision_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let original = Collection::new(vec![
            record("first.csv", "dupe", 1.0),
            record("second.csv", "dupe", 2.0),
        ]);
        save_collection(&original, &path).unwrap();
        let reloaded = load_collection(&path).unwrap();

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records[0].filename, "second.csv");
        assert_eq!(reloaded.records[0].samples[0].i, 2.0);
    }

    #[test]
    fn missing_store_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_collection(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn corrupt_store_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_collection(&path).is_err());
    }
}
