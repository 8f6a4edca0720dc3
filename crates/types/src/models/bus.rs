//! Bus network records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::Id;
use crate::models::node::{Location, NodeCommon};
use crate::models::types::Connection;
use crate::sourced::Sourced;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusCompany {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<Sourced<Id<BusLine>>>,
    #[serde(default, alias = "stations")]
    pub stops: Vec<Sourced<Id<BusStop>>>,
    #[serde(default)]
    pub local: bool,
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusLine {
    pub code: String,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    #[serde(default)]
    pub colour: Option<Sourced<String>>,
    pub company: Sourced<Id<BusCompany>>,
    #[serde(default)]
    pub stops: Vec<Sourced<Id<BusStop>>>,
    #[serde(default)]
    pub ref_stop: Option<Sourced<Id<BusStop>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

pub type BusConnection = Connection<BusLine, BusStop>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    pub company: Sourced<Id<BusCompany>>,
    #[serde(default)]
    pub connections: BTreeMap<Id<BusStop>, Vec<Sourced<BusConnection>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}
