//! Census block loading from GeoJSON feature collections
//!
//! The fetch/caching side lives outside this tool; by the time we run, a
//! county's blocks sit in a local `.geojson` file. Counts arrive as feature
//! properties; nulls coerce to zero and the derived percentage/household
//! fields are computed here when the file does not carry them.

use std::fs;
use std::path::{Path, PathBuf};

use geo::{Area, Coord, LineString, Polygon};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use super::model::{BlockCounts, CensusBlock};

/// Failure modes when reading a county block file
#[derive(Debug, Error)]
pub enum BlockDataError {
    #[error("failed to read block file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature {index} has no geometry")]
    MissingGeometry { index: usize },

    #[error("feature {index} has unsupported geometry type {kind:?}")]
    UnsupportedGeometry { index: usize, kind: String },

    #[error("feature {index} has a ring with fewer than 4 positions")]
    MalformedRing { index: usize },

    #[error("feature {index} has no geoid property")]
    MissingBlockId { index: usize },
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: BlockProperties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BlockProperties {
    geoid: Option<String>,
    total_population: Option<u32>,
    black_population: Option<u32>,
    population_18plus: Option<u32>,
    black_population_18plus: Option<u32>,
    housing_units: Option<u32>,
    black_hh: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

/// Load a county's census blocks from a GeoJSON file on disk
pub fn load_census_blocks(path: &Path) -> Result<Vec<CensusBlock>, BlockDataError> {
    let raw = fs::read_to_string(path).map_err(|source| BlockDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let blocks = parse_feature_collection(&raw)?;
    debug!("loaded {} blocks from {}", blocks.len(), path.display());
    Ok(blocks)
}

/// Parse a GeoJSON FeatureCollection of block features
pub fn parse_feature_collection(raw: &str) -> Result<Vec<CensusBlock>, BlockDataError> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;
    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| block_from_feature(index, feature))
        .collect()
}

fn block_from_feature(index: usize, feature: Feature) -> Result<CensusBlock, BlockDataError> {
    let geometry = feature
        .geometry
        .ok_or(BlockDataError::MissingGeometry { index })?;
    let polygon = polygon_from_geometry(index, geometry)?;

    let props = feature.properties;
    let geoid = props.geoid.ok_or(BlockDataError::MissingBlockId { index })?;

    let mut counts = BlockCounts {
        total_population: props.total_population.unwrap_or(0),
        black_population: props.black_population.unwrap_or(0),
        population_18plus: props.population_18plus.unwrap_or(0),
        black_population_18plus: props.black_population_18plus.unwrap_or(0),
        housing_units: props.housing_units.unwrap_or(0),
        black_hh: 0,
    };
    counts.black_hh = props.black_hh.unwrap_or_else(|| {
        (counts.housing_units as f64 * counts.pct_black() / 100.0).round() as u32
    });

    Ok(CensusBlock {
        geoid,
        geometry: polygon,
        counts,
    })
}

fn polygon_from_geometry(index: usize, geometry: Geometry) -> Result<Polygon<f64>, BlockDataError> {
    match geometry.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates)?;
            polygon_from_rings(index, &rings)
        }
        "MultiPolygon" => {
            // Block geometry is nominally single-part; a multi-part feature
            // contributes its largest part
            let parts: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(geometry.coordinates)?;
            let polygons: Vec<Polygon<f64>> = parts
                .iter()
                .map(|rings| polygon_from_rings(index, rings))
                .collect::<Result<_, _>>()?;
            polygons
                .into_iter()
                .max_by(|a, b| {
                    a.unsigned_area()
                        .partial_cmp(&b.unsigned_area())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .ok_or(BlockDataError::MalformedRing { index })
        }
        other => Err(BlockDataError::UnsupportedGeometry {
            index,
            kind: other.to_string(),
        }),
    }
}

fn polygon_from_rings(
    index: usize,
    rings: &[Vec<Vec<f64>>],
) -> Result<Polygon<f64>, BlockDataError> {
    let mut lines = rings
        .iter()
        .map(|ring| ring_to_line(index, ring))
        .collect::<Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        return Err(BlockDataError::MalformedRing { index });
    }
    let exterior = lines.remove(0);
    Ok(Polygon::new(exterior, lines))
}

fn ring_to_line(index: usize, ring: &[Vec<f64>]) -> Result<LineString<f64>, BlockDataError> {
    if ring.len() < 4 {
        return Err(BlockDataError::MalformedRing { index });
    }
    let coords = ring
        .iter()
        .map(|position| {
            if position.len() < 2 {
                Err(BlockDataError::MalformedRing { index })
            } else {
                Ok(Coord {
                    x: position[0],
                    y: position[1],
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}
