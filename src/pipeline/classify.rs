//! Threshold classification of blocks entering the pipeline

use log::debug;

use super::model::{CensusBlock, OrgUnit, PipelineConfig};

/// Outcome of the threshold classifier
#[derive(Debug, Default)]
pub struct Classified {
    /// Majority-Black blocks already large enough to stand alone, promoted
    /// to single-block units
    pub direct_units: Vec<OrgUnit>,
    /// Majority-Black blocks below the household floor, to be aggregated
    pub pool: Vec<CensusBlock>,
    /// Blocks under the majority threshold, dropped entirely
    pub minority_excluded: usize,
    /// Majority-Black blocks sitting exactly on the household floor; these
    /// match neither partition and are dropped, as the source rules say
    pub at_floor_skipped: usize,
}

/// Split blocks into excluded, directly-qualifying, and aggregation-pool sets.
///
/// A block qualifies on its own when it clears the majority threshold and has
/// strictly more than `min_black_hh` Black households; strictly fewer routes
/// it to adjacency clustering.
pub fn classify_blocks(blocks: Vec<CensusBlock>, config: &PipelineConfig) -> Classified {
    let mut classified = Classified::default();

    for block in blocks {
        if block.pct_black() < config.majority_pct {
            classified.minority_excluded += 1;
            continue;
        }
        if block.black_hh() > config.min_black_hh {
            classified.direct_units.push(OrgUnit::from_block(&block));
        } else if block.black_hh() < config.min_black_hh {
            classified.pool.push(block);
        } else {
            classified.at_floor_skipped += 1;
        }
    }

    debug!(
        "classified blocks: {} direct, {} pooled, {} minority-excluded, {} at floor",
        classified.direct_units.len(),
        classified.pool.len(),
        classified.minority_excluded,
        classified.at_floor_skipped
    );
    classified
}
