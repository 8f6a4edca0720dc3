//! Rail network records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::Id;
use crate::models::node::{Location, NodeCommon};
use crate::models::types::{Connection, RailMode};
use crate::sourced::Sourced;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RailCompany {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<Sourced<Id<RailLine>>>,
    #[serde(default)]
    pub stations: Vec<Sourced<Id<RailStation>>>,
    /// Local (intra-city) operator rather than an intercity one
    #[serde(default)]
    pub local: bool,
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RailLine {
    pub code: String,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    #[serde(default)]
    pub colour: Option<Sourced<String>>,
    #[serde(default)]
    pub mode: Option<Sourced<RailMode>>,
    pub company: Sourced<Id<RailCompany>>,
    #[serde(default)]
    pub stations: Vec<Sourced<Id<RailStation>>>,
    /// Station from which the line's connections are walked
    #[serde(default)]
    pub ref_station: Option<Sourced<Id<RailStation>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

pub type RailConnection = Connection<RailLine, RailStation>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RailStation {
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    pub company: Sourced<Id<RailCompany>>,
    /// Neighbouring station -> the lines linking to it
    #[serde(default)]
    pub connections: BTreeMap<Id<RailStation>, Vec<Sourced<RailConnection>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}
