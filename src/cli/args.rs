//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Orgunits - Partition county census blocks into organizing units
#[derive(Parser, Debug)]
#[command(name = "orgunits")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// One or more US states or counties (state abbreviation, state or
    /// county FIPS code, or county name; components may be combined,
    /// e.g. "Lee GA")
    #[arg(required = true)]
    pub selections: Vec<String>,

    /// Data directory holding the FIPS table and per-county files.
    /// Defaults to the platform data directory.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// County lookup table (TSV with fips/name/state columns).
    /// Defaults to fips.tsv in the data directory.
    #[arg(long)]
    pub fips_table: Option<PathBuf>,

    /// Percent-Black floor for a block to enter the pipeline
    #[arg(long, default_value = "50.0", value_parser = validate_percent)]
    pub majority_pct: f64,

    /// Minimum Black households for an org unit to stand alone
    #[arg(long, default_value = "50")]
    pub min_households: u32,

    /// Household target when splitting oversized clusters; also the upper
    /// bound for emitting a whole cluster as one unit
    #[arg(long, default_value = "100")]
    pub target_households: u32,

    /// Cap on absorptions during a single region growth
    #[arg(long, default_value = "100", value_parser = validate_cap)]
    pub max_growth_steps: u32,

    /// Cap on seed rounds when splitting one cluster
    #[arg(long, default_value = "100", value_parser = validate_cap)]
    pub max_split_rounds: u32,

    /// Drop sub-units whose growth hit the step cap before reaching the
    /// target, even when they clear the household floor
    #[arg(long, default_value = "false")]
    pub drop_stalled: bool,

    /// Seed for the id randomizer; omit to use system entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip writing output files (run and summarize only)
    #[arg(long, default_value = "false")]
    pub no_export: bool,
}

impl Cli {
    /// The data directory, falling back to the platform default
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::utils::paths::default_data_dir)
    }

    /// The FIPS table path, derived from the data directory if not given
    pub fn fips_table(&self) -> PathBuf {
        self.fips_table
            .clone()
            .unwrap_or_else(|| crate::utils::paths::fips_table_path(&self.data_dir()))
    }
}

/// Validator for percentage arguments
fn validate_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=100.0).contains(&value) {
        Err(format!(
            "percentage must be between 0.0 and 100.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for iteration caps
fn validate_cap(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("iteration cap must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
