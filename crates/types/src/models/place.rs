//! Located records that are not part of a transport network.

use serde::{Deserialize, Serialize};

use crate::models::node::{Location, NodeCommon};
use crate::models::types::{Rank, SpawnWarpType};
use crate::sourced::Sourced;

/// A warp reachable from the server's spawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnWarp {
    pub name: String,
    pub warp_type: SpawnWarpType,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub rank: Sourced<Rank>,
    pub mayor: Sourced<String>,
    pub deputy_mayor: Sourced<Option<String>>,
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_town_without_deputy() {
        let town: Town = serde_json::from_value(json!({
            "i": 70,
            "source": ["Town List"],
            "name": "Central City",
            "rank": {"v": "Premier", "s": ["Town List"]},
            "mayor": {"v": "Mayor Name", "s": ["Town List"]},
            "deputy_mayor": {"v": null, "s": ["Town List"]},
            "world": {"v": "New", "s": ["Town List"]},
            "coordinates": {"v": [0, 0], "s": ["Town List"]},
            "proximity": {},
            "shared_facility": []
        }))
        .unwrap();

        assert_eq!(*town.rank, Rank::Premier);
        assert_eq!(town.deputy_mayor.value(), &None);
        assert_eq!(town.mayor.sources(), ["Town List".to_string()]);
    }
}
