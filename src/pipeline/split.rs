//! Region-growing decomposition of oversized clusters
//!
//! Each oversized cluster is partitioned by repeatedly seeding at the
//! westernmost unclaimed block, growing along the touching graph until the
//! household target is reached, then claiming every unclaimed block whose
//! centroid falls inside the grown shape. Iteration caps bound both the
//! growth and the seed loop; hitting one is a logged warning, never a silent
//! success.

use std::cmp::Ordering;
use std::collections::HashSet;

use geo::{Contains, Point};
use log::{debug, warn};

use super::cluster::RawCluster;
use super::geometry::union_all;
use super::model::{BlockCounts, CensusBlock, OrgUnit, PipelineConfig};

/// What came out of splitting one oversized cluster
#[derive(Debug, Default)]
pub struct SplitOutcome {
    pub units: Vec<OrgUnit>,
    /// Claimed sub-units dropped for falling below the household floor
    pub discarded: usize,
    /// Emitted sub-units whose growth hit the step cap before the target
    pub stalled_kept: usize,
    /// Members never claimed because the seed-round cap ran out
    pub unassigned: usize,
}

/// Split one oversized cluster into qualifying sub-units.
///
/// `pool`, `centroids`, and `graph` are indexed alike; `graph` is the
/// touching graph produced by adjacency clustering.
pub fn split_cluster(
    pool: &[CensusBlock],
    centroids: &[Point<f64>],
    graph: &[Vec<usize>],
    cluster: &RawCluster,
    config: &PipelineConfig,
) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut rounds = 0u32;

    let order = |a: &usize, b: &usize| -> Ordering {
        centroids[*a]
            .x()
            .partial_cmp(&centroids[*b].x())
            .unwrap_or(Ordering::Equal)
            .then_with(|| pool[*a].geoid.cmp(&pool[*b].geoid))
    };

    while claimed.len() < cluster.members.len() {
        if rounds >= config.max_split_rounds {
            outcome.unassigned = cluster.members.len() - claimed.len();
            warn!(
                "seed-round cap ({}) exhausted with {} blocks unassigned; keeping partial result",
                config.max_split_rounds, outcome.unassigned
            );
            break;
        }
        rounds += 1;

        // Seed at the westernmost unclaimed member, ties broken by id
        let seed = match cluster
            .members
            .iter()
            .copied()
            .filter(|i| !claimed.contains(i))
            .min_by(|a, b| order(a, b))
        {
            Some(seed) => seed,
            None => break,
        };

        // Grow one member at a time along the touching graph. An absorption
        // that would carry the running sum past the target is refused, so
        // the remainder is left for later seeds.
        let mut grown = vec![seed];
        let mut in_grown: HashSet<usize> = HashSet::from([seed]);
        let mut black_hh = pool[seed].black_hh();
        let mut steps = 0u32;
        let mut stalled = false;
        while black_hh < config.target_black_hh {
            if steps >= config.max_growth_steps {
                stalled = true;
                warn!(
                    "growth step cap ({}) hit at {} of {} households",
                    config.max_growth_steps, black_hh, config.target_black_hh
                );
                break;
            }
            let next = grown
                .iter()
                .flat_map(|&member| graph[member].iter().copied())
                .filter(|j| !claimed.contains(j) && !in_grown.contains(j))
                .min_by(|a, b| order(a, b));
            let next = match next {
                Some(next) => next,
                None => break,
            };
            if black_hh + pool[next].black_hh() > config.target_black_hh {
                break;
            }
            black_hh += pool[next].black_hh();
            in_grown.insert(next);
            grown.push(next);
            steps += 1;
        }

        // Claim everything the grown shape encloses, absorbed or not
        let grown_geometry = union_all(grown.iter().map(|&i| &pool[i].geometry));
        let newly_claimed: Vec<usize> = cluster
            .members
            .iter()
            .copied()
            .filter(|i| !claimed.contains(i) && grown_geometry.contains(&centroids[*i]))
            .collect();

        if newly_claimed.is_empty() {
            // Degenerate geometry can leave even the seed's centroid outside
            // the grown shape; the round cap is the way out of this state.
            debug!("seed round claimed no blocks");
            continue;
        }
        claimed.extend(newly_claimed.iter().copied());

        let counts = BlockCounts::sum(newly_claimed.iter().map(|&i| &pool[i].counts));
        let keep = counts.black_hh >= config.min_black_hh
            && (!stalled || config.keep_stalled_growth);
        if keep {
            if stalled {
                outcome.stalled_kept += 1;
            }
            let geometry = union_all(newly_claimed.iter().map(|&i| &pool[i].geometry));
            let geoids = newly_claimed.iter().map(|&i| pool[i].geoid.clone()).collect();
            outcome
                .units
                .push(OrgUnit::from_aggregate(geometry, counts, geoids));
        } else {
            outcome.discarded += 1;
        }
    }

    debug!(
        "split cluster of {} blocks into {} sub-units ({} discarded, {} rounds)",
        cluster.members.len(),
        outcome.units.len(),
        outcome.discarded,
        rounds
    );
    outcome
}
