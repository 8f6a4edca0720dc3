//! The heterogeneous node table entry and its category discriminant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::identifiers::*;
use crate::models::air::{AirAirline, AirAirport, AirFlight, AirGate};
use crate::models::bus::{BusCompany, BusLine, BusStop};
use crate::models::place::{SpawnWarp, Town};
use crate::models::rail::{RailCompany, RailLine, RailStation};
use crate::models::sea::{SeaCompany, SeaLine, SeaStop};
use crate::models::types::*;
use crate::sourced::Sourced;

/// Fields carried by every node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeCommon {
    pub i: NodeId,
    /// Sources that prove the node's existence
    #[serde(default)]
    pub source: Vec<String>,
}

/// Physical position of a node, embedded by every located category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub world: Option<Sourced<World>>,
    #[serde(default)]
    pub coordinates: Option<Sourced<Coordinates>>,
    /// Other located nodes within walking distance
    #[serde(default)]
    pub proximity: BTreeMap<NodeId, Sourced<Proximity>>,
    /// Located nodes in the same building, station or hub
    #[serde(default)]
    pub shared_facility: Vec<Sourced<NodeId>>,
}

impl Location {
    pub fn world(&self) -> Option<World> {
        self.world.as_ref().map(|w| *w.value())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates.as_ref().map(|c| *c.value())
    }

    pub fn point(&self) -> Option<geo::Point> {
        self.coordinates().map(|(x, y)| geo::Point::new(x, y))
    }
}

// ============================================================================
// Category
// ============================================================================

/// Discriminant of a [`Node`], as written in its `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
pub enum Category {
    AirAirline,
    AirAirport,
    AirFlight,
    AirGate,
    BusCompany,
    BusLine,
    BusStop,
    SeaCompany,
    SeaLine,
    SeaStop,
    RailCompany,
    RailLine,
    RailStation,
    SpawnWarp,
    Town,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Air,
    Bus,
    Sea,
    Rail,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Lowercase name used by the browse routes and the dispatch lookup.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::AirAirline => "airline",
            Self::AirAirport => "airport",
            Self::AirFlight => "flight",
            Self::AirGate => "gate",
            Self::BusCompany => "buscompany",
            Self::BusLine => "busline",
            Self::BusStop => "busstop",
            Self::SeaCompany => "seacompany",
            Self::SeaLine => "sealine",
            Self::SeaStop => "seastop",
            Self::RailCompany => "railcompany",
            Self::RailLine => "railline",
            Self::RailStation => "station",
            Self::SpawnWarp => "spawnwarp",
            Self::Town => "town",
        }
    }

    /// Inverse of [`Category::short_name`]. Any other string, including
    /// differently cased names, is rejected.
    pub fn from_short_name(name: &str) -> Result<Self> {
        Self::iter()
            .find(|c| c.short_name() == name)
            .ok_or_else(|| GatelogueError::UnknownCategory(name.to_owned()))
    }

    pub fn mode(self) -> Mode {
        match self {
            Self::AirAirline | Self::AirAirport | Self::AirFlight | Self::AirGate => Mode::Air,
            Self::BusCompany | Self::BusLine | Self::BusStop => Mode::Bus,
            Self::SeaCompany | Self::SeaLine | Self::SeaStop => Mode::Sea,
            Self::RailCompany | Self::RailLine | Self::RailStation => Mode::Rail,
            Self::SpawnWarp | Self::Town => Mode::Other,
        }
    }

    /// Whether records of this category embed a [`Location`].
    pub fn is_located(self) -> bool {
        matches!(
            self,
            Self::AirAirport
                | Self::BusStop
                | Self::SeaStop
                | Self::RailStation
                | Self::SpawnWarp
                | Self::Town
        )
    }
}

// ============================================================================
// Node
// ============================================================================

/// One entry of the node table, tagged by its `type` field.
///
/// An unrecognised `type` is a decoding error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    AirAirline(AirAirline),
    AirAirport(AirAirport),
    AirFlight(AirFlight),
    AirGate(AirGate),
    BusCompany(BusCompany),
    BusLine(BusLine),
    BusStop(BusStop),
    SeaCompany(SeaCompany),
    SeaLine(SeaLine),
    SeaStop(SeaStop),
    RailCompany(RailCompany),
    RailLine(RailLine),
    RailStation(RailStation),
    SpawnWarp(SpawnWarp),
    Town(Town),
}

/// A concrete category record that can be narrowed out of a [`Node`].
pub trait NodeKind: Sized {
    const CATEGORY: Category;

    fn from_node(node: &Node) -> Option<&Self>;
    fn into_node(self) -> Node;
    fn common(&self) -> &NodeCommon;

    fn location(&self) -> Option<&Location> {
        None
    }

    fn id(&self) -> Id<Self> {
        self.common().i.cast()
    }
}

macro_rules! impl_node_kind {
    ($($ty:ident),* $(,)?) => {
        $(
            impl NodeKind for $ty {
                const CATEGORY: Category = Category::$ty;

                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_node(self) -> Node {
                    Node::$ty(self)
                }

                fn common(&self) -> &NodeCommon {
                    &self.common
                }

                impl_node_kind!(@location $ty);
            }

            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$ty(value)
                }
            }
        )*

        impl Node {
            pub fn category(&self) -> Category {
                match self {
                    $(Node::$ty(_) => Category::$ty,)*
                }
            }

            pub fn common(&self) -> &NodeCommon {
                match self {
                    $(Node::$ty(inner) => inner.common(),)*
                }
            }

            /// The embedded location, for located categories only.
            pub fn location(&self) -> Option<&Location> {
                match self {
                    $(Node::$ty(inner) => inner.location(),)*
                }
            }
        }
    };
    (@location AirAirport) => { impl_node_kind!(@located); };
    (@location BusStop) => { impl_node_kind!(@located); };
    (@location SeaStop) => { impl_node_kind!(@located); };
    (@location RailStation) => { impl_node_kind!(@located); };
    (@location SpawnWarp) => { impl_node_kind!(@located); };
    (@location Town) => { impl_node_kind!(@located); };
    (@location $ty:ident) => {};
    (@located) => {
        fn location(&self) -> Option<&Location> {
            Some(&self.location)
        }
    };
}

impl_node_kind!(
    AirAirline,
    AirAirport,
    AirFlight,
    AirGate,
    BusCompany,
    BusLine,
    BusStop,
    SeaCompany,
    SeaLine,
    SeaStop,
    RailCompany,
    RailLine,
    RailStation,
    SpawnWarp,
    Town,
);

impl Node {
    pub fn id(&self) -> NodeId {
        self.common().i
    }

    pub fn sources(&self) -> &[String] {
        &self.common().source
    }

    pub fn is_located(&self) -> bool {
        self.location().is_some()
    }

    /// Narrow to a concrete category record.
    pub fn as_kind<T: NodeKind>(&self) -> Option<&T> {
        T::from_node(self)
    }

    /// Display name of the record, where the category has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::AirAirline(n) => Some(&n.name),
            Node::AirAirport(n) => Some(&n.code),
            Node::AirFlight(n) => n.codes.first().map(String::as_str),
            Node::AirGate(n) => n.code.as_deref(),
            Node::BusCompany(n) => Some(&n.name),
            Node::BusLine(n) => Some(n.name.as_deref().map_or(n.code.as_str(), |s| s.as_str())),
            Node::BusStop(n) => n.name.as_deref().map(String::as_str),
            Node::SeaCompany(n) => Some(&n.name),
            Node::SeaLine(n) => Some(n.name.as_deref().map_or(n.code.as_str(), |s| s.as_str())),
            Node::SeaStop(n) => n.name.as_deref().map(String::as_str),
            Node::RailCompany(n) => Some(&n.name),
            Node::RailLine(n) => Some(n.name.as_deref().map_or(n.code.as_str(), |s| s.as_str())),
            Node::RailStation(n) => n.name.as_deref().map(String::as_str),
            Node::SpawnWarp(n) => Some(&n.name),
            Node::Town(n) => Some(&n.name),
        }
    }
}
