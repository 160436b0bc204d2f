//! Pipeline module - orchestrates the partitioning stages

pub mod area;
pub mod assemble;
pub mod classify;
pub mod cluster;
pub mod geometry;
pub mod loader;
pub mod model;
pub mod split;

pub use area::*;
pub use assemble::*;
pub use classify::*;
pub use cluster::*;
pub use geometry::{block_centroid, centroids, touches, union_all, BlockIndex};
pub use loader::*;
pub use model::*;
pub use split::*;

use log::debug;
use rand::Rng;

/// Per-stage tallies for one county run, for reporting
#[derive(Debug, Default, Clone, Copy)]
pub struct PartitionStats {
    pub total_blocks: usize,
    pub minority_excluded: usize,
    pub at_floor_skipped: usize,
    pub direct_units: usize,
    pub raw_clusters: usize,
    pub clusters_discarded: usize,
    pub direct_aggregates: usize,
    pub oversized_clusters: usize,
    pub split_units: usize,
    pub split_discarded: usize,
    pub stalled_kept: usize,
    pub unassigned_blocks: usize,
}

/// Result of partitioning one county's blocks
#[derive(Debug)]
pub struct PartitionResult {
    /// `None` when the county produced no qualifying units
    pub units: Option<Vec<model::OrgUnit>>,
    pub stats: PartitionStats,
}

/// Run the full partitioning pipeline over one county's blocks.
///
/// Stages run strictly left to right: classify, cluster, route, split,
/// assemble, measure. The random source only feeds id assignment.
pub fn partition_blocks<R: Rng>(
    blocks: Vec<model::CensusBlock>,
    config: &model::PipelineConfig,
    rng: &mut R,
) -> PartitionResult {
    let mut stats = PartitionStats {
        total_blocks: blocks.len(),
        ..Default::default()
    };

    debug!("partitioning {} blocks", blocks.len());
    let classified = classify::classify_blocks(blocks, config);
    stats.minority_excluded = classified.minority_excluded;
    stats.at_floor_skipped = classified.at_floor_skipped;
    stats.direct_units = classified.direct_units.len();

    let mut units = classified.direct_units;

    let (clusters, graph) = cluster::cluster_adjacent(&classified.pool);
    stats.raw_clusters = clusters.len();

    let routed = cluster::route_clusters(&classified.pool, clusters, config);
    stats.clusters_discarded = routed.discarded;
    stats.direct_aggregates = routed.direct_units.len();
    stats.oversized_clusters = routed.oversized.len();
    units.extend(routed.direct_units);

    let points = geometry::centroids(&classified.pool);
    for oversized in &routed.oversized {
        let outcome = split::split_cluster(&classified.pool, &points, &graph, oversized, config);
        stats.split_units += outcome.units.len();
        stats.split_discarded += outcome.discarded;
        stats.stalled_kept += outcome.stalled_kept;
        stats.unassigned_blocks += outcome.unassigned;
        units.extend(outcome.units);
    }

    let mut units = assemble::assemble_units(units, rng);
    if let Some(units) = units.as_mut() {
        area::compute_areas(units, &config.state_plane);
    }

    PartitionResult { units, stats }
}
