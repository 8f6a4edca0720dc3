//! # gatelogue-types
//!
//! Typed access to Gatelogue snapshots: the aggregated MRT transit dataset
//! of airlines, airports, gates, rail, sea and bus networks, spawn warps and
//! towns.
//!
//! ## Features
//!
//! - **One node table**: every record is a [`Node`] keyed by its numeric id
//! - **Optional provenance**: the same types read `data.json` and
//!   `data_no_sources.json`
//! - **Typed lookups**: narrow by category with [`GatelogueData::get`]
//! - **Spatial queries**: per-world R-tree over located nodes
//!
//! ## Example
//!
//! ```
//! use gatelogue_types::prelude::*;
//!
//! let data: GatelogueData = r#"{
//!     "version": 2,
//!     "timestamp": "2026-01-01T00:00:00",
//!     "nodes": {
//!         "1": {"type": "AirAirport", "i": 1, "source": [], "code": "ABC",
//!               "gates": [2], "world": "New", "coordinates": [0, 0]},
//!         "2": {"type": "AirGate", "i": 2, "source": [], "code": "A1", "airport": 1}
//!     }
//! }"#
//! .parse()
//! .unwrap();
//!
//! let airport = data.get::<AirAirport>("1").unwrap();
//! let gate = data.resolve(&airport.gates[0]).unwrap();
//! assert_eq!(gate.code.as_deref(), Some("A1"));
//! assert!(data.get::<AirGate>("1").is_none());
//! ```

pub mod data;
pub mod identifiers;
pub mod models;
pub mod sourced;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::data::GatelogueData;
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::sourced::{strip_sources, Sourced};
    pub use crate::spatial::{SpatialHit, SpatialIndex};
}

pub use prelude::*;

pub use geo;
