//! Curate labeled Keithley I/V measurement runs.
//!
//! The Keithley acquisition software names run files by date and time,
//! so the experimenter keeps a separate notes CSV relating filenames to
//! descriptions. This crate:
//! - loads raw runs into normalized records (`t_s`, `v`, `i`),
//! - joins them against the notes index, soliciting a short label per
//!   matched file through an injectable strategy,
//! - manages the resulting ordered collection (slice, inspect, persist,
//!   reload),
//! - builds renderable plot descriptions for an external sink.
//!
//! # Example
//!
//! ```no_run
//! use iv_curator::data::builder::{build_collection, UseDescription};
//! use iv_curator::store;
//!
//! let (_notes, runs) =
//!     build_collection("data/".as_ref(), "notes.csv", &mut UseDescription).unwrap();
//! println!("{}", runs.listing(0, 0));
//! let picked = runs.slice(&[2, 0, 1]).unwrap();
//! store::save_collection(&picked, "bias_tests.json".as_ref()).unwrap();
//! ```

pub mod data;
pub mod notes;
pub mod plot;
pub mod store;
