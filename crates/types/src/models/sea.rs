//! Sea network records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::Id;
use crate::models::node::{Location, NodeCommon};
use crate::models::types::{Connection, SeaMode};
use crate::sourced::Sourced;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeaCompany {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<Sourced<Id<SeaLine>>>,
    #[serde(default, alias = "stations")]
    pub stops: Vec<Sourced<Id<SeaStop>>>,
    #[serde(default)]
    pub local: bool,
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeaLine {
    pub code: String,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    #[serde(default)]
    pub colour: Option<Sourced<String>>,
    #[serde(default)]
    pub mode: Option<Sourced<SeaMode>>,
    pub company: Sourced<Id<SeaCompany>>,
    #[serde(default)]
    pub stops: Vec<Sourced<Id<SeaStop>>>,
    #[serde(default)]
    pub ref_stop: Option<Sourced<Id<SeaStop>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
}

pub type SeaConnection = Connection<SeaLine, SeaStop>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeaStop {
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub name: Option<Sourced<String>>,
    pub company: Sourced<Id<SeaCompany>>,
    #[serde(default)]
    pub connections: BTreeMap<Id<SeaStop>, Vec<Sourced<SeaConnection>>>,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}
