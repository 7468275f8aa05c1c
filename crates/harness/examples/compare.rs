//! Compares the shipped strategies over a range of sizes.
//!
//! ```text
//! cargo run --example compare [options.toml]
//! RUST_LOG=solvebench_harness=debug cargo run --example compare
//! ```
//!
//! Without an options file, times are scaled to the first strategy.

use std::{env, error::Error, fs};

use solvebench_core::Layout;
use solvebench_harness::{Options, ResultForm, sweep};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match env::args().nth(1) {
        Some(path) => Options::from_toml(&fs::read_to_string(path)?)?,
        None => Options::new(5, ResultForm::Scaled, false, Layout::RowMajor)?,
    };

    let sizes = [2, 4, 8, 16, 32, 64, 128, 256];
    let table = sweep(sizes, &options)?;

    println!("{table}");
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
