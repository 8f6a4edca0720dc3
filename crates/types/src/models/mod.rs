//! Gatelogue data model: the node union, its category records and shared types.

pub mod air;
pub mod bus;
pub mod node;
pub mod place;
pub mod rail;
pub mod sea;
pub mod types;

// Re-exports for convenience
pub use air::{AirAirline, AirAirport, AirFlight, AirGate};
pub use bus::{BusCompany, BusConnection, BusLine, BusStop};
pub use node::{Category, Location, Mode, Node, NodeCommon, NodeKind};
pub use place::{SpawnWarp, Town};
pub use rail::{RailCompany, RailConnection, RailLine, RailStation};
pub use sea::{SeaCompany, SeaConnection, SeaLine, SeaStop};
pub use types::{
    AirMode, Connection, Coordinates, Direction, GatelogueError, Proximity, RailMode, Rank, Result,
    SeaMode, SpawnWarpType, World,
};
