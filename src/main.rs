//! Orgunits: Census-block partitioning CLI tool
//!
//! A command-line tool that resolves county selections against the FIPS
//! table, partitions each county's census blocks into organizing units,
//! and writes GeoJSON/CSV outputs with a run summary.

mod cli;
mod counties;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Cli;
use counties::{County, CountyIndex};
use pipeline::{load_census_blocks, partition_blocks, PipelineConfig};
use report::{export_org_units, PartitionSummary};
use utils::{
    create_spinner, finish_with_success, paths, print_banner, print_completion, print_config,
    print_count, print_county_header, print_info, print_step_header, print_step_time,
    print_success, print_warning,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.target_households < cli.min_households {
        anyhow::bail!(
            "Target households ({}) must not be below the household floor ({})",
            cli.target_households,
            cli.min_households
        );
    }

    print_banner(env!("CARGO_PKG_VERSION"));

    let data_dir = cli.data_dir();
    print_config(&data_dir, cli.min_households, cli.target_households, cli.seed);

    let index = CountyIndex::load(&cli.fips_table())?;

    let config = PipelineConfig {
        majority_pct: cli.majority_pct,
        min_black_hh: cli.min_households,
        target_black_hh: cli.target_households,
        max_growth_steps: cli.max_growth_steps,
        max_split_rounds: cli.max_split_rounds,
        keep_stalled_growth: !cli.drop_stalled,
        ..Default::default()
    };

    // One random source across the whole run; a fixed seed reproduces ids
    let mut rng: StdRng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut runs = 0usize;
    for selection in &cli.selections {
        let matches = index.find(selection);
        if matches.is_empty() {
            print_warning(&format!("No counties match '{selection}'"));
            continue;
        }
        for county in matches {
            run_county(&county, &cli, &config, &data_dir, &mut rng)?;
            runs += 1;
        }
    }

    print_completion(runs);
    Ok(())
}

fn run_county(
    county: &County,
    cli: &Cli,
    config: &PipelineConfig,
    data_dir: &std::path::Path,
    rng: &mut StdRng,
) -> Result<()> {
    print_county_header(&county.name, &county.state, &county.fips);

    // Step 1: Load the county's census blocks
    print_step_header(1, "Load census blocks");
    let step_start = Instant::now();
    let blocks_file = paths::blocks_path(data_dir, county);
    let blocks = load_census_blocks(&blocks_file)?;
    print_count("census blocks loaded", blocks.len());
    print_step_time(step_start.elapsed());

    // Step 2: Partition into org units
    print_step_header(2, "Partition into org units");
    let step_start = Instant::now();
    let spinner = create_spinner("Clustering and splitting...");
    let result = partition_blocks(blocks, config, rng);
    finish_with_success(&spinner, "Partitioning complete");
    print_step_time(step_start.elapsed());

    let units = match result.units {
        Some(units) => units,
        None => {
            print_info("No qualifying org units in this county");
            return Ok(());
        }
    };

    // Step 3: Export
    if cli.no_export {
        print_info("Skipping export (--no-export)");
    } else {
        print_step_header(3, "Export");
        let step_start = Instant::now();
        export_org_units(&units, county, data_dir)?;
        print_success(&format!(
            "Wrote {}",
            paths::county_dir(data_dir, county).display()
        ));
        print_step_time(step_start.elapsed());
    }

    let label = format!("{}, {}", county.name, county.state);
    PartitionSummary::new(&label, result.stats, &units).display();
    Ok(())
}
