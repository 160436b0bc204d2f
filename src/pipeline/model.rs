//! Core record types for the partitioning pipeline

use geo::{MultiPolygon, Polygon};
use serde::Serialize;

use super::area::StatePlane;

/// Raw population counts carried by a block or aggregated across a unit.
///
/// Aggregation is always summation of these raw fields; percentage fields
/// are recomputed from the sums, never averaged across children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCounts {
    pub total_population: u32,
    pub black_population: u32,
    pub population_18plus: u32,
    pub black_population_18plus: u32,
    pub housing_units: u32,
    /// Estimated Black households, `round(housing_units * pct_black / 100)`
    pub black_hh: u32,
}

impl BlockCounts {
    /// Fold another block's counts into this aggregate
    pub fn absorb(&mut self, other: &BlockCounts) {
        self.total_population += other.total_population;
        self.black_population += other.black_population;
        self.population_18plus += other.population_18plus;
        self.black_population_18plus += other.black_population_18plus;
        self.housing_units += other.housing_units;
        self.black_hh += other.black_hh;
    }

    /// Sum counts across a set of blocks
    pub fn sum<'a>(counts: impl IntoIterator<Item = &'a BlockCounts>) -> BlockCounts {
        let mut total = BlockCounts::default();
        for c in counts {
            total.absorb(c);
        }
        total
    }

    /// Percent Black of the total population; 0 when the population is 0
    pub fn pct_black(&self) -> f64 {
        percentage(self.black_population, self.total_population)
    }

    /// Percent Black of the 18+ population; 0 when that population is 0
    pub fn pct_black_18plus(&self) -> f64 {
        percentage(self.black_population_18plus, self.population_18plus)
    }
}

/// `part / whole * 100`, with a zero denominator mapping to 0 rather than NaN
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// One census block: the atomic geographic unit entering the pipeline.
///
/// Geometry is a polygon in geographic (degree) coordinates. Blocks are
/// read-only inputs; a pipeline run never mutates them.
#[derive(Debug, Clone)]
pub struct CensusBlock {
    /// Census GEOID (state + county + tract + block)
    pub geoid: String,
    pub geometry: Polygon<f64>,
    pub counts: BlockCounts,
}

impl CensusBlock {
    pub fn pct_black(&self) -> f64 {
        self.counts.pct_black()
    }

    pub fn black_hh(&self) -> u32 {
        self.counts.black_hh
    }
}

/// Whether a unit is one qualifying block or an aggregate of adjacent blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrgType {
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "block aggregate")]
    BlockAggregate,
}

impl OrgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::Block => "block",
            OrgType::BlockAggregate => "block aggregate",
        }
    }
}

/// Blank fields filled in by hand after canvassing assignments are made
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub support_volunteer_name: String,
    pub support_volunteer_phone: String,
    pub support_volunteer_email: String,
    pub block_team_member: String,
    pub block_team_phone: String,
    pub block_team_email: String,
    pub notes: String,
}

/// Final output region: one qualifying block or an aggregate of adjacent
/// blocks, used for canvassing assignment.
#[derive(Debug, Clone)]
pub struct OrgUnit {
    /// Randomized sequential id, assigned by the assembler (1..=N)
    pub id: u32,
    pub org_type: OrgType,
    pub geometry: MultiPolygon<f64>,
    pub counts: BlockCounts,
    /// Recomputed from `counts`, never averaged from member percentages
    pub pct_black: f64,
    pub pct_black_18plus: f64,
    /// Filled by the area calculator after ids are assigned
    pub square_miles: f64,
    /// GEOIDs of the constituent blocks, for disjointness checks downstream
    pub block_geoids: Vec<String>,
    pub contact: ContactFields,
}

impl OrgUnit {
    /// A single qualifying block promoted directly to a unit, geometry and
    /// counts unchanged
    pub fn from_block(block: &CensusBlock) -> Self {
        OrgUnit {
            id: 0,
            org_type: OrgType::Block,
            geometry: MultiPolygon::new(vec![block.geometry.clone()]),
            counts: block.counts,
            pct_black: block.counts.pct_black(),
            pct_black_18plus: block.counts.pct_black_18plus(),
            square_miles: 0.0,
            block_geoids: vec![block.geoid.clone()],
            contact: ContactFields::default(),
        }
    }

    /// An aggregate unit from a merged geometry and summed counts
    pub fn from_aggregate(
        geometry: MultiPolygon<f64>,
        counts: BlockCounts,
        block_geoids: Vec<String>,
    ) -> Self {
        OrgUnit {
            id: 0,
            org_type: OrgType::BlockAggregate,
            geometry,
            pct_black: counts.pct_black(),
            pct_black_18plus: counts.pct_black_18plus(),
            counts,
            square_miles: 0.0,
            block_geoids,
            contact: ContactFields::default(),
        }
    }

    pub fn black_hh(&self) -> u32 {
        self.counts.black_hh
    }
}

/// Tunable thresholds and guards for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Percent-Black floor for a block to enter the pipeline at all
    pub majority_pct: f64,
    /// Minimum Black households for a unit to stand alone
    pub min_black_hh: u32,
    /// Growth target for splitting oversized clusters; also the upper bound
    /// for emitting a raw cluster directly
    pub target_black_hh: u32,
    /// Inner cap on absorptions during a single region growth
    pub max_growth_steps: u32,
    /// Outer cap on seed rounds when splitting one cluster
    pub max_split_rounds: u32,
    /// Keep a sub-unit whose growth hit the step cap before reaching the
    /// target, provided it clears `min_black_hh`. Off means such sub-units
    /// are claimed but dropped.
    pub keep_stalled_growth: bool,
    /// Planar frame used for area measurement
    pub state_plane: StatePlane,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            majority_pct: 50.0,
            min_black_hh: 50,
            target_black_hh: 100,
            max_growth_steps: 100,
            max_split_rounds: 100,
            keep_stalled_growth: true,
            state_plane: StatePlane::north_carolina(),
        }
    }
}
