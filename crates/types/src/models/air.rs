//! Air network records.

use serde::{Deserialize, Serialize};

use crate::identifiers::Id;
use crate::models::node::{Location, NodeCommon};
use crate::models::types::AirMode;
use crate::sourced::Sourced;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirAirline {
    pub name: String,
    #[serde(default)]
    pub link: Option<Sourced<String>>,
    #[serde(default)]
    pub flights: Vec<Sourced<Id<AirFlight>>>,
    #[serde(default)]
    pub gates: Vec<Sourced<Id<AirGate>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirAirport {
    /// IATA-style airport code
    pub code: String,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    #[serde(default)]
    pub names: Option<Sourced<Vec<String>>>,
    #[serde(default)]
    pub link: Option<Sourced<String>>,
    #[serde(default)]
    pub modes: Option<Sourced<Vec<AirMode>>>,
    #[serde(default)]
    pub gates: Vec<Sourced<Id<AirGate>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirFlight {
    /// Flight numbers, the first being the primary one
    pub codes: Vec<String>,
    #[serde(default)]
    pub mode: Option<Sourced<AirMode>>,
    pub airline: Sourced<Id<AirAirline>>,
    #[serde(default)]
    pub gates: Vec<Sourced<Id<AirGate>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirGate {
    /// Gate code; `None` for airports without numbered gates
    #[serde(default, alias = "codes")]
    pub code: Option<String>,
    #[serde(default)]
    pub size: Option<Sourced<String>>,
    #[serde(default)]
    pub airline: Option<Sourced<Id<AirAirline>>>,
    pub airport: Sourced<Id<AirAirport>>,
    #[serde(default)]
    pub flights: Vec<Sourced<Id<AirFlight>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

impl AirAirport {
    /// Primary display name, if any: the first of `names`, else `name`.
    pub fn name(&self) -> Option<&str> {
        self.names
            .as_ref()
            .and_then(|n| n.value().first())
            .or_else(|| self.name.as_ref().map(Sourced::value))
            .map(String::as_str)
    }
}

impl AirFlight {
    pub fn primary_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }
}
