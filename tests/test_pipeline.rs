//! Integration tests for the full partitioning pipeline

use orgunits::pipeline::{partition_blocks, OrgType, PipelineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn seeded() -> StdRng {
    StdRng::seed_from_u64(14)
}

#[test]
fn three_touching_blocks_yield_one_single_and_one_aggregate() {
    // A qualifies on its own; B and C only together
    let blocks = vec![
        block("a", 0, 0, 70, 60),
        block("b", 1, 0, 60, 30),
        block("c", 2, 0, 55, 25),
    ];
    let result = partition_blocks(blocks, &PipelineConfig::default(), &mut seeded());
    let units = result.units.expect("two units expected");
    assert_eq!(units.len(), 2);

    let single = units
        .iter()
        .find(|u| u.org_type == OrgType::Block)
        .expect("a single-block unit");
    assert_eq!(single.black_hh(), 60);
    assert_eq!(single.block_geoids, vec!["a".to_string()]);

    let aggregate = units
        .iter()
        .find(|u| u.org_type == OrgType::BlockAggregate)
        .expect("an aggregate unit");
    assert_eq!(aggregate.black_hh(), 55);
    let mut members = aggregate.block_geoids.clone();
    members.sort();
    assert_eq!(members, vec!["b".to_string(), "c".to_string()]);

    assert_ids_cover_one_through_n(&units);
}

#[test]
fn five_block_row_splits_into_covering_qualifying_units() {
    let result = partition_blocks(
        row_of_blocks(&[30, 30, 30, 30, 30]),
        &PipelineConfig::default(),
        &mut seeded(),
    );
    let units = result.units.expect("split units expected");

    assert!(units.len() >= 2);
    assert!(units.iter().all(|u| u.black_hh() >= 50));
    assert!(units.iter().all(|u| u.org_type == OrgType::BlockAggregate));
    assert_disjoint_units(&units);

    let covered: usize = units.iter().map(|u| u.block_geoids.len()).sum();
    assert_eq!(covered, 5, "all five blocks should be covered");
}

#[test]
fn lone_minority_block_means_no_result() {
    let result = partition_blocks(
        vec![block("a", 0, 0, 40, 60)],
        &PipelineConfig::default(),
        &mut seeded(),
    );
    assert!(result.units.is_none());
    assert_eq!(result.stats.minority_excluded, 1);
}

#[test]
fn empty_input_means_no_result() {
    let result = partition_blocks(Vec::new(), &PipelineConfig::default(), &mut seeded());
    assert!(result.units.is_none());
}

#[test]
fn aggregate_percentages_come_from_sums_not_averages() {
    // 70% of 100 and 60% of 300: the pooled rate is 62.5%, the naive
    // average of rates would be 65%
    let mut blocks = vec![block("a", 0, 0, 70, 30), block("b", 1, 0, 60, 25)];
    blocks[1].counts.total_population = 300;
    blocks[1].counts.black_population = 180;

    let result = partition_blocks(blocks, &PipelineConfig::default(), &mut seeded());
    let units = result.units.expect("one aggregate expected");
    assert_eq!(units.len(), 1);

    let expected = 250.0 / 400.0 * 100.0;
    assert!((units[0].pct_black - expected).abs() < 1e-6);
    assert!((units[0].pct_black - 65.0).abs() > 1.0);
}

#[test]
fn single_block_units_carry_source_counts_and_geometry() {
    let source = block("a", 3, 2, 80, 75);
    let result = partition_blocks(
        vec![source.clone()],
        &PipelineConfig::default(),
        &mut seeded(),
    );
    let units = result.units.expect("one unit expected");

    assert_eq!(units[0].counts, source.counts);
    assert_eq!(units[0].geometry.0.len(), 1);
    assert_eq!(units[0].geometry.0[0], source.geometry);
}

#[test]
fn unit_areas_are_measured_in_the_planar_frame() {
    // One fixture block is 0.01 x 0.01 degrees near 35.5N, a bit under
    // 0.4 square miles
    let result = partition_blocks(
        vec![block("a", 0, 0, 70, 60)],
        &PipelineConfig::default(),
        &mut seeded(),
    );
    let units = result.units.expect("one unit expected");
    assert!(
        (0.3..0.5).contains(&units[0].square_miles),
        "unexpected area: {}",
        units[0].square_miles
    );
}

#[test]
fn mixed_county_produces_disjoint_units_with_sequential_ids() {
    // Two separate rows plus direct qualifiers and an excluded block
    let mut blocks = row_of_blocks(&[30, 30, 30, 30, 30]);
    blocks.push(block("big-1", 0, 3, 80, 90));
    blocks.push(block("big-2", 4, 3, 75, 55));
    blocks.push(block("pair-1", 0, 6, 60, 28));
    blocks.push(block("pair-2", 1, 6, 60, 27));
    blocks.push(block("minority", 8, 8, 20, 40));

    let result = partition_blocks(blocks, &PipelineConfig::default(), &mut seeded());
    let units = result.units.expect("units expected");

    assert_disjoint_units(&units);
    assert_ids_cover_one_through_n(&units);
    assert!(units.iter().all(|u| u.black_hh() >= 50));
    assert_eq!(result.stats.minority_excluded, 1);
    assert_eq!(result.stats.direct_units, 2);
    assert_eq!(result.stats.direct_aggregates, 1);
    assert!(result.stats.split_units >= 2);
}

#[test]
fn clusters_below_the_floor_are_dropped_entirely() {
    // 20 + 15 = 35 in aggregate: irreducibly too small
    let result = partition_blocks(
        row_of_blocks(&[20, 15]),
        &PipelineConfig::default(),
        &mut seeded(),
    );
    assert!(result.units.is_none());
    assert_eq!(result.stats.raw_clusters, 1);
    assert_eq!(result.stats.clusters_discarded, 1);
}

#[test]
fn a_fixed_seed_reproduces_the_id_assignment() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(2026);
        let result = partition_blocks(
            row_of_blocks(&[30, 30, 30, 30, 30]),
            &PipelineConfig::default(),
            &mut rng,
        );
        result
            .units
            .expect("units expected")
            .iter()
            .map(|u| (u.id, u.block_geoids.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
