//! Spatial indexing over located nodes.
//!
//! One R-tree per [`World`]; nodes without a world or coordinates are left
//! out. Query results carry ids that resolve against the snapshot the index
//! was built from.

pub mod index;
pub mod queries;

use std::collections::HashMap;

use geo::Point;
use rstar::RTree;
use serde::Serialize;

use crate::data::GatelogueData;
use crate::identifiers::NodeId;
use crate::models::{Category, World};

pub use index::LocatedEntry;
pub use queries::{block_distance, valid_radius};

/// A located node found by a spatial query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpatialHit {
    pub id: NodeId,
    pub category: Category,
    /// Distance from the query point, in blocks
    pub distance: f64,
}

#[derive(Default)]
pub struct SpatialIndex {
    trees: HashMap<World, RTree<LocatedEntry>>,
}

impl SpatialIndex {
    pub fn build(data: &GatelogueData) -> Self {
        let mut per_world: HashMap<World, Vec<LocatedEntry>> = HashMap::new();
        for (node, location) in data.located() {
            let (Some(world), Some(point)) = (location.world(), location.point()) else {
                continue;
            };
            per_world
                .entry(world)
                .or_default()
                .push(LocatedEntry::new(node.id(), node.category(), point));
        }

        Self {
            trees: per_world
                .into_iter()
                .map(|(world, entries)| (world, RTree::bulk_load(entries)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.trees.values().map(RTree::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len_in(&self, world: World) -> usize {
        self.trees.get(&world).map_or(0, RTree::size)
    }

    /// Nodes in `world` within `radius` blocks of `point`, nearest first.
    pub fn within(&self, world: World, point: Point, radius: f64) -> Vec<SpatialHit> {
        if !valid_radius(radius) {
            return Vec::new();
        }
        let Some(tree) = self.trees.get(&world) else {
            return Vec::new();
        };

        // rstar takes the squared radius
        let mut hits: Vec<SpatialHit> = tree
            .locate_within_distance([point.x(), point.y()], radius * radius)
            .map(|entry| hit(entry, point))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        hits
    }

    /// The `n` nodes in `world` closest to `point`, nearest first.
    pub fn nearest(&self, world: World, point: Point, n: usize) -> Vec<SpatialHit> {
        let Some(tree) = self.trees.get(&world) else {
            return Vec::new();
        };
        tree.nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|entry| hit(entry, point))
            .collect()
    }
}

fn hit(entry: &LocatedEntry, from: Point) -> SpatialHit {
    SpatialHit {
        id: entry.id,
        category: entry.category,
        distance: block_distance(entry.point(), from),
    }
}
