//! Builds a grid flow dataset and prints a JSON summary of what it holds.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use geoloader::constants::{KEY_POI, KEY_TARGET, KEY_TIME};
use geoloader::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory below which `flow_data.npy` and `poi_data.npy` live.
    #[arg(long)]
    root: PathBuf,

    /// Optional JSON file with window and split parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report the evaluation split instead of the training split.
    #[arg(long, default_value_t = false)]
    test: bool,

    /// Override the directory search depth.
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Report {
    name: String,
    config: GridConfig,
    skip_hours: usize,
    cardinality: usize,
    shapes: BTreeMap<&'static str, Vec<usize>>,
    normalization: NormalizationRange,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GridConfig::from_json_file(path)?,
        None => GridConfig::default(),
    };
    if args.test {
        config = config.with_split(Split::Test);
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_search_depth(depth);
    }

    let data = NycBikeDataset::new(&args.root, &config)?;

    let mut shapes = BTreeMap::new();
    for scale in [Scale::Closeness, Scale::Period, Scale::Trend] {
        if let Some(window) = data.window(scale) {
            shapes.insert(scale.key(), window.shape().to_vec());
        }
    }
    shapes.insert(KEY_TIME, data.t_data().shape().to_vec());
    shapes.insert(KEY_POI, data.p_data().shape().to_vec());
    shapes.insert(KEY_TARGET, data.y_data().shape().to_vec());

    let report = Report {
        name: data.name(),
        config: *data.config(),
        skip_hours: data.skip_hours(),
        cardinality: data.cardinality(),
        shapes,
        normalization: data.normalization(),
    };

    let text = serde_json::to_string_pretty(&report)?;
    println!("{text}");

    Ok(())
}
