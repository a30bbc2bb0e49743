#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Inspect a georeferenced GeoJSON document.
//!
//! ```text
//! geoson path/to/site.geojson          # datum, heading and one line per feature
//! geoson path/to/site.geojson --json   # the parsed model as JSON
//! ```
//!
//! Set `RUST_LOG=debug` to see which features were skipped.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "geoson",
    about = "Parse a GeoJSON document into local-frame features"
)]
struct Cli {
    /// GeoJSON file to read
    path: PathBuf,

    /// Print the parsed model as pretty JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let fc = geoson::read_feature_collection(&cli.path)?;
    log::info!(
        "Parsed {} feature(s) from {}",
        fc.features.len(),
        cli.path.display()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&fc)?);
    } else {
        print!("{fc}");
    }

    Ok(())
}
