//! R-tree entries for located nodes.
//!
//! Entries carry only the node's id and category so that an index can be
//! stored next to the snapshot it was built from without borrowing it.

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::identifiers::NodeId;
use crate::models::Category;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocatedEntry {
    pub id: NodeId,
    pub category: Category,
    point: [f64; 2],
}

impl LocatedEntry {
    pub fn new(id: NodeId, category: Category, location: Point) -> Self {
        Self {
            id,
            category,
            point: [location.x(), location.y()],
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.point[0], self.point[1])
    }
}

impl RTreeObject for LocatedEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for LocatedEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
