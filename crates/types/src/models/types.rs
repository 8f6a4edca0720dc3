//! Core data types and enums shared by the category records.

use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::models::node::Category;
use crate::sourced::Sourced;

// ============================================================================
// Enums
// ============================================================================

/// Server world a located node is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
pub enum World {
    Old,
    New,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirMode {
    #[serde(rename = "helicopter")]
    Helicopter,
    #[serde(rename = "seaplane")]
    Seaplane,
    #[serde(rename = "warp plane")]
    WarpPlane,
    #[serde(rename = "traincarts plane")]
    TrainCartsPlane,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RailMode {
    Warp,
    Cart,
    #[serde(rename = "traincarts")]
    TrainCarts,
    Vehicles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeaMode {
    Ferry,
    Cruise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnWarpType {
    Premier,
    Terminus,
    Portal,
    Misc,
}

/// Town rank on the server's town list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Unranked,
    Councillor,
    Mayor,
    Senator,
    Governor,
    Premier,
    Community,
}

// ============================================================================
// Data Structures
// ============================================================================

/// Block coordinates `(x, z)` of a located node.
pub type Coordinates = (f64, f64);

/// Walking-distance relation between two located nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    /// Distance in blocks
    pub distance: Option<f64>,
    /// Whether the relation is declared by the operating company/ies rather
    /// than inferred from coordinates
    #[serde(default)]
    pub explicit: bool,
}

/// One service link from a stop to a neighbouring stop of the same mode.
///
/// `L` is the line category and `S` the stop category.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Connection<L, S> {
    pub line: Id<L>,
    #[serde(default)]
    pub direction: Option<Direction<S>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Direction<S> {
    /// Stop that the "forward" direction heads towards
    pub direction: Id<S>,
    #[serde(default)]
    pub forward_label: Option<String>,
    #[serde(default)]
    pub backward_label: Option<String>,
    pub one_way: Sourced<bool>,
}

// Manual impls: derives would demand `L: Clone` etc. of the phantom markers.
impl<L, S> Clone for Connection<L, S> {
    fn clone(&self) -> Self {
        Self {
            line: self.line,
            direction: self.direction.clone(),
        }
    }
}

impl<L, S> PartialEq for Connection<L, S> {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.direction == other.direction
    }
}

impl<S> Clone for Direction<S> {
    fn clone(&self) -> Self {
        Self {
            direction: self.direction,
            forward_label: self.forward_label.clone(),
            backward_label: self.backward_label.clone(),
            one_way: self.one_way.clone(),
        }
    }
}

impl<S> PartialEq for Direction<S> {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.forward_label == other.forward_label
            && self.backward_label == other.backward_label
            && self.one_way == other.one_way
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatelogueError {
    #[error("Unknown category name: {0:?}")]
    UnknownCategory(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {id} is {actual}, not {expected}")]
    IncorrectType {
        id: NodeId,
        expected: Category,
        actual: Category,
    },

    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GatelogueError>;
