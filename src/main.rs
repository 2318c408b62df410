use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use iv_curator::data::builder::{build_collection, ConsolePrompt, Labeler, UseDescription};
use iv_curator::store;

/// Curate, label, and persist Keithley I/V measurement runs.
#[derive(Parser)]
#[command(name = "iv-curator", version)]
struct Cli {
    /// Directory containing the raw run files (and usually the notes file)
    path: Option<PathBuf>,

    /// Name of the notes CSV inside the data directory
    #[arg(short, long, default_value = "notes.csv")]
    notes: String,

    /// Take labels from the notes descriptions instead of prompting
    #[arg(long)]
    use_descriptions: bool,

    /// First index to list
    #[arg(long, default_value_t = 0)]
    istart: usize,

    /// Last index to list (0 = through the end)
    #[arg(long, default_value_t = 0)]
    iend: usize,

    /// Save the labeled collection to this store file after scanning
    #[arg(long, value_name = "STORE")]
    save: Option<PathBuf>,

    /// List the contents of a previously saved store and exit
    #[arg(long, value_name = "STORE", conflicts_with = "path")]
    reload: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(store_path) = cli.reload {
        let collection = store::load_collection(&store_path)?;
        print!("{}", collection.listing(cli.istart, cli.iend));
        return Ok(());
    }

    let Some(path) = cli.path else {
        bail!("a data directory is required (or use --reload <STORE>)");
    };

    let mut console = ConsolePrompt;
    let mut batch = UseDescription;
    let labeler: &mut dyn Labeler = if cli.use_descriptions {
        &mut batch
    } else {
        &mut console
    };

    let (notes, collection) = build_collection(&path, &cli.notes, labeler)?;
    if notes.is_absent() {
        println!("no notes for this directory");
    }
    print!("{}", collection.listing(cli.istart, cli.iend));

    if let Some(store_path) = cli.save {
        store::save_collection(&collection, &store_path)?;
        println!("saved {} record(s) to {}", collection.len(), store_path.display());
    }

    Ok(())
}
