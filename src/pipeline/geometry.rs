//! Geometry predicates and the spatial index behind neighbor queries
//!
//! The touching relation (shared boundary, zero interior overlap) drives both
//! adjacency clustering and region growing. Exact DE-9IM tests are expensive,
//! so candidates are pre-filtered through an R-tree of block bounding boxes
//! and only envelope hits get the exact test.

use geo::{BooleanOps, BoundingRect, Centroid, MultiPolygon, Point, Polygon, Relate};
use rstar::{RTree, RTreeObject, AABB};

use super::model::CensusBlock;

/// True when the two polygons share boundary but no interior area
pub fn touches(a: &Polygon<f64>, b: &Polygon<f64>) -> bool {
    a.relate(b).is_touches()
}

/// Union a set of block polygons into one (possibly multi-part) geometry.
///
/// Expressed as a pairwise boolean-op fold so no dissolve primitive is needed.
pub fn union_all<'a>(polygons: impl IntoIterator<Item = &'a Polygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = polygons.into_iter();
    let first = match iter.next() {
        Some(p) => p,
        None => return MultiPolygon::new(Vec::new()),
    };
    let mut merged = MultiPolygon::new(vec![first.clone()]);
    for polygon in iter {
        merged = merged.union(&MultiPolygon::new(vec![polygon.clone()]));
    }
    merged
}

/// Centroid of a block polygon.
///
/// Blocks with empty rings are rejected at load time, so a centroid always
/// exists; the origin fallback only guards the degenerate case.
pub fn block_centroid(polygon: &Polygon<f64>) -> Point<f64> {
    polygon.centroid().unwrap_or_else(|| Point::new(0.0, 0.0))
}

/// Centroids for a whole block collection, indexed like the input
pub fn centroids(blocks: &[CensusBlock]) -> Vec<Point<f64>> {
    blocks.iter().map(|b| block_centroid(&b.geometry)).collect()
}

/// Bounding-box entry stored in the R-tree, pointing back at a block index
struct BlockEnvelope {
    index: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for BlockEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

/// R-tree over block bounding boxes for candidate neighbor lookup
pub struct BlockIndex {
    tree: RTree<BlockEnvelope>,
}

impl BlockIndex {
    pub fn build(blocks: &[CensusBlock]) -> Self {
        let entries = blocks
            .iter()
            .enumerate()
            .filter_map(|(index, block)| {
                block.geometry.bounding_rect().map(|rect| BlockEnvelope {
                    index,
                    aabb: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();
        BlockIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Indices of blocks whose bounding box intersects the given polygon's
    pub fn candidates(&self, polygon: &Polygon<f64>) -> Vec<usize> {
        let rect = match polygon.bounding_rect() {
            Some(rect) => rect,
            None => return Vec::new(),
        };
        let aabb = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        self.tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|entry| entry.index)
            .collect()
    }
}

/// Adjacency lists under the touching relation, one entry per block.
///
/// Each list is sorted ascending so traversal order is deterministic for a
/// fixed input ordering.
pub fn touching_graph(blocks: &[CensusBlock]) -> Vec<Vec<usize>> {
    let index = BlockIndex::build(blocks);
    let mut graph: Vec<Vec<usize>> = vec![Vec::new(); blocks.len()];
    for (i, block) in blocks.iter().enumerate() {
        for j in index.candidates(&block.geometry) {
            if j <= i {
                continue;
            }
            if touches(&block.geometry, &blocks[j].geometry) {
                graph[i].push(j);
                graph[j].push(i);
            }
        }
    }
    for neighbors in &mut graph {
        neighbors.sort_unstable();
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::model::BlockCounts;
    use geo::{polygon, Contains};

    fn square(x: f64, y: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ]
    }

    fn block_at(geoid: &str, x: f64, y: f64) -> CensusBlock {
        CensusBlock {
            geoid: geoid.to_string(),
            geometry: square(x, y),
            counts: BlockCounts::default(),
        }
    }

    #[test]
    fn edge_sharing_squares_touch() {
        assert!(touches(&square(0.0, 0.0), &square(1.0, 0.0)));
    }

    #[test]
    fn corner_sharing_squares_touch() {
        assert!(touches(&square(0.0, 0.0), &square(1.0, 1.0)));
    }

    #[test]
    fn separated_squares_do_not_touch() {
        assert!(!touches(&square(0.0, 0.0), &square(2.5, 0.0)));
    }

    #[test]
    fn overlapping_squares_do_not_touch() {
        assert!(!touches(&square(0.0, 0.0), &square(0.5, 0.0)));
    }

    #[test]
    fn union_of_adjacent_squares_contains_both_centroids() {
        let a = square(0.0, 0.0);
        let b = square(1.0, 0.0);
        let merged = union_all([&a, &b]);
        assert!(merged.contains(&Point::new(0.5, 0.5)));
        assert!(merged.contains(&Point::new(1.5, 0.5)));
    }

    #[test]
    fn union_of_nothing_is_empty() {
        let merged = union_all([]);
        assert!(merged.0.is_empty());
    }

    #[test]
    fn touching_graph_links_a_row_of_squares() {
        let blocks = vec![
            block_at("a", 0.0, 0.0),
            block_at("b", 1.0, 0.0),
            block_at("c", 2.0, 0.0),
            block_at("d", 5.0, 0.0),
        ];
        let graph = touching_graph(&blocks);
        assert_eq!(graph[0], vec![1]);
        assert_eq!(graph[1], vec![0, 2]);
        assert_eq!(graph[2], vec![1]);
        assert!(graph[3].is_empty());
    }
}
