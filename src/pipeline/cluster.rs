//! Adjacency clustering of the aggregation pool
//!
//! Connected components of the touching graph become raw clusters; counts are
//! summed across members and percentages recomputed from the sums.

use log::debug;

use super::geometry::{touching_graph, union_all};
use super::model::{BlockCounts, CensusBlock, OrgUnit, PipelineConfig};
use geo::MultiPolygon;

/// A contiguous group of pooled blocks, before threshold routing
#[derive(Debug, Clone)]
pub struct RawCluster {
    /// Indices into the pool this cluster was built from
    pub members: Vec<usize>,
    pub geometry: MultiPolygon<f64>,
    pub counts: BlockCounts,
}

impl RawCluster {
    pub fn black_hh(&self) -> u32 {
        self.counts.black_hh
    }
}

/// Merge touching pool blocks into raw clusters.
///
/// Also returns the touching graph so the splitter can reuse it for frontier
/// expansion instead of rescanning geometry.
pub fn cluster_adjacent(pool: &[CensusBlock]) -> (Vec<RawCluster>, Vec<Vec<usize>>) {
    let graph = touching_graph(pool);
    let mut visited = vec![false; pool.len()];
    let mut clusters = Vec::new();

    for start in 0..pool.len() {
        if visited[start] {
            continue;
        }
        // Breadth-first walk of one component
        let mut members = vec![start];
        let mut frontier = vec![start];
        visited[start] = true;
        while let Some(current) = frontier.pop() {
            for &neighbor in &graph[current] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    members.push(neighbor);
                    frontier.push(neighbor);
                }
            }
        }
        members.sort_unstable();

        let counts = BlockCounts::sum(members.iter().map(|&i| &pool[i].counts));
        let geometry = union_all(members.iter().map(|&i| &pool[i].geometry));
        clusters.push(RawCluster {
            members,
            geometry,
            counts,
        });
    }

    debug!("found {} raw clusters in {} pooled blocks", clusters.len(), pool.len());
    (clusters, graph)
}

/// Raw clusters routed by their aggregate household count
#[derive(Debug, Default)]
pub struct RoutedClusters {
    /// Clusters emitted directly as aggregate units (within the workable band)
    pub direct_units: Vec<OrgUnit>,
    /// Clusters above the target, handed to the splitter
    pub oversized: Vec<RawCluster>,
    /// Clusters below the floor even in aggregate, dropped
    pub discarded: usize,
}

/// Apply the cluster threshold filter: discard the irreducibly small, emit
/// the workable, route the oversized onward.
pub fn route_clusters(
    pool: &[CensusBlock],
    clusters: Vec<RawCluster>,
    config: &PipelineConfig,
) -> RoutedClusters {
    let mut routed = RoutedClusters::default();

    for cluster in clusters {
        if cluster.black_hh() < config.min_black_hh {
            routed.discarded += 1;
        } else if cluster.black_hh() <= config.target_black_hh {
            let geoids = cluster
                .members
                .iter()
                .map(|&i| pool[i].geoid.clone())
                .collect();
            routed
                .direct_units
                .push(OrgUnit::from_aggregate(cluster.geometry, cluster.counts, geoids));
        } else {
            routed.oversized.push(cluster);
        }
    }

    debug!(
        "routed clusters: {} direct, {} oversized, {} discarded",
        routed.direct_units.len(),
        routed.oversized.len(),
        routed.discarded
    );
    routed
}
