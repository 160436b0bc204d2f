//! Shared test fixtures: synthetic block rows with known household counts

use geo::{Coord, LineString, Polygon};
use orgunits::pipeline::{BlockCounts, CensusBlock, OrgUnit};
use std::collections::HashSet;

/// Fixture blocks sit near the North Carolina state plane so projected
/// areas come out plausible
pub const BASE_LON: f64 = -78.80;
pub const BASE_LAT: f64 = 35.50;

/// Side length of a fixture block, in degrees
pub const BLOCK_SIZE: f64 = 0.01;

fn edge(cell: i32) -> f64 {
    BASE_LON + cell as f64 * BLOCK_SIZE
}

/// Square block polygon at grid cell (col, row). Neighboring cells share an
/// edge exactly, so the touching relation holds bit-for-bit.
pub fn square(col: i32, row: i32) -> Polygon<f64> {
    let (x0, x1) = (edge(col), edge(col + 1));
    let (y0, y1) = (
        BASE_LAT + row as f64 * BLOCK_SIZE,
        BASE_LAT + (row + 1) as f64 * BLOCK_SIZE,
    );
    Polygon::new(
        LineString::new(vec![
            Coord { x: x0, y: y0 },
            Coord { x: x1, y: y0 },
            Coord { x: x1, y: y1 },
            Coord { x: x0, y: y1 },
            Coord { x: x0, y: y0 },
        ]),
        Vec::new(),
    )
}

/// A block at grid cell (col, row) with the given percent Black (of a
/// 100-person population) and Black household count
pub fn block(geoid: &str, col: i32, row: i32, pct_black: u32, black_hh: u32) -> CensusBlock {
    CensusBlock {
        geoid: geoid.to_string(),
        geometry: square(col, row),
        counts: BlockCounts {
            total_population: 100,
            black_population: pct_black,
            population_18plus: 80,
            black_population_18plus: pct_black * 8 / 10,
            housing_units: 60,
            black_hh,
        },
    }
}

/// A west-to-east row of majority-Black blocks with the given household
/// counts, each touching its neighbor
pub fn row_of_blocks(black_hh: &[u32]) -> Vec<CensusBlock> {
    black_hh
        .iter()
        .enumerate()
        .map(|(i, &hh)| block(&format!("row-{i:02}"), i as i32, 0, 70, hh))
        .collect()
}

/// Every block id appears in at most one unit
pub fn assert_disjoint_units(units: &[OrgUnit]) {
    let mut seen = HashSet::new();
    for unit in units {
        for geoid in &unit.block_geoids {
            assert!(
                seen.insert(geoid.clone()),
                "block {geoid} appears in more than one unit"
            );
        }
    }
}

/// Ids are exactly 1..=N with no duplicates or gaps
pub fn assert_ids_cover_one_through_n(units: &[OrgUnit]) {
    let mut ids: Vec<u32> = units.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    let expected: Vec<u32> = (1..=units.len() as u32).collect();
    assert_eq!(ids, expected, "ids are not a bijection onto 1..=N");
}
