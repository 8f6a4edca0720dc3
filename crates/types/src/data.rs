//! The snapshot root and its typed accessor.
//!
//! [`GatelogueData`] is the decoded document as-is: a version tag, a
//! generation timestamp and one flat table of [`Node`]s. All lookups are
//! plain reads over that table; references between records are followed by
//! looking the target id up again and checking its discriminant.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoEnumIterator;

use crate::identifiers::*;
use crate::models::*;
use crate::sourced::{strip_sources, Sourced};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatelogueData {
    /// Version of the data format
    pub version: u64,
    /// When the aggregation that produced this snapshot ran
    pub timestamp: String,
    /// Node table in ascending id order. Each key is the id its node carries.
    #[serde(deserialize_with = "deserialize_node_table")]
    pub nodes: BTreeMap<NodeId, Node>,
}

/// Decode the node table, rejecting a key given twice or a key that
/// disagrees with the node's own `i`.
fn deserialize_node_table<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<NodeId, Node>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NodeTableVisitor;

    impl<'de> Visitor<'de> for NodeTableVisitor {
        type Value = BTreeMap<NodeId, Node>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from node id to node")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut nodes = BTreeMap::new();
            while let Some((key, node)) = map.next_entry::<NodeId, Node>()? {
                if node.id() != key {
                    return Err(de::Error::custom(format_args!(
                        "node keyed {key} carries id {}",
                        node.id()
                    )));
                }
                if nodes.insert(key, node).is_some() {
                    return Err(de::Error::custom(format_args!("duplicate node id {key}")));
                }
            }
            Ok(nodes)
        }
    }

    deserializer.deserialize_map(NodeTableVisitor)
}

impl GatelogueData {
    pub fn new(version: u64, timestamp: impl Into<String>, nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            version,
            timestamp: timestamp.into(),
            nodes: nodes.into_iter().map(|n| (n.id(), n)).collect(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Project the snapshot onto its provenance-free form, the same shape as
    /// `data_no_sources.json`.
    pub fn into_unsourced(self) -> Result<Self> {
        let value = serde_json::to_value(&self)?;
        Self::from_value(strip_sources(value))
    }

    /// Parsed generation timestamp. Accepts RFC 3339 and naive ISO-8601
    /// (taken as UTC); `None` if neither parses.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::from_str(&self.timestamp)
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ---- Lookups ----

    /// Look a node up by id. Keys that are not ids are simply absent.
    pub fn node(&self, key: impl NodeKey) -> Option<&Node> {
        self.nodes.get(&key.node_id()?)
    }

    /// Look a node up, returning it only if it is of `category`.
    pub fn node_of(&self, key: impl NodeKey, category: Category) -> Option<&Node> {
        self.node(key).filter(|n| n.category() == category)
    }

    /// Typed lookup: `None` if absent or of another category.
    pub fn get<T: NodeKind>(&self, key: impl NodeKey) -> Option<&T> {
        self.node(key).and_then(T::from_node)
    }

    /// Like [`GatelogueData::get`], but says why the lookup failed.
    pub fn require<T: NodeKind>(&self, id: Id<T>) -> Result<&T> {
        let node = self
            .node(id)
            .ok_or(GatelogueError::NodeNotFound(id.erase()))?;
        T::from_node(node).ok_or(GatelogueError::IncorrectType {
            id: id.erase(),
            expected: T::CATEGORY,
            actual: node.category(),
        })
    }

    /// Follow a reference field to the record it designates.
    pub fn resolve<T: NodeKind>(&self, reference: &Sourced<Id<T>>) -> Option<&T> {
        self.resolve_id(*reference.value())
    }

    pub fn resolve_id<T: NodeKind>(&self, id: Id<T>) -> Option<&T> {
        self.get(id)
    }

    /// Follow a list of references, skipping dangling ones.
    pub fn resolve_all<'a, T: NodeKind + 'a>(
        &'a self,
        references: &'a [Sourced<Id<T>>],
    ) -> impl Iterator<Item = &'a T> + 'a {
        references.iter().filter_map(move |r| self.resolve(r))
    }

    /// Lookup by lowercase category name (`"airport"`, `"station"`, ...).
    ///
    /// An unrecognised name is an error, never an absent result.
    pub fn by_category_name(&self, name: &str, key: impl NodeKey) -> Result<Option<&Node>> {
        let category = Category::from_short_name(name)?;
        Ok(self.node_of(key, category))
    }

    // ---- Collections ----

    /// All nodes, in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn nodes_of(&self, category: Category) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(move |n| n.category() == category)
    }

    pub fn iter<'a, T: NodeKind + 'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a {
        self.nodes.values().filter_map(T::from_node)
    }

    /// Nodes that embed a location, with that location.
    pub fn located(&self) -> impl Iterator<Item = (&Node, &Location)> + '_ {
        self.nodes.values().filter_map(|n| n.location().map(|l| (n, l)))
    }

    /// Number of nodes per category; every category is present.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts: BTreeMap<Category, usize> = Category::iter().map(|c| (c, 0)).collect();
        for node in self.nodes.values() {
            *counts.entry(node.category()).or_default() += 1;
        }
        counts
    }

    // ---- Relations ----

    pub fn air_airport_by_code(&self, code: &str) -> Option<&AirAirport> {
        self.air_airports()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// Gates of the airport with the given code, `None` if there is no such
    /// airport.
    pub fn gates_at_airport(&self, code: &str) -> Option<Vec<&AirGate>> {
        let airport = self.air_airport_by_code(code)?;
        Some(self.resolve_all(&airport.gates).collect())
    }

    /// Located nodes within walking distance of `key`, with the proximity
    /// record. Empty if the node is absent or not located.
    pub fn nearby(&self, key: impl NodeKey) -> Vec<(&Node, &Sourced<Proximity>)> {
        let Some(location) = self.node(key).and_then(Node::location) else {
            return Vec::new();
        };
        location
            .proximity
            .iter()
            .filter_map(|(id, prox)| self.node(*id).map(|n| (n, prox)))
            .collect()
    }

    /// Located nodes sharing a facility with `key`.
    pub fn shared_facilities(&self, key: impl NodeKey) -> Vec<&Node> {
        let Some(location) = self.node(key).and_then(Node::location) else {
            return Vec::new();
        };
        location
            .shared_facility
            .iter()
            .filter_map(|id| self.node(*id.value()))
            .collect()
    }
}

impl FromStr for GatelogueData {
    type Err = GatelogueError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

macro_rules! category_accessors {
    ($($ty:ident => $all:ident, $get:ident;)*) => {
        impl GatelogueData {
            $(
                #[doc = concat!("All [`", stringify!($ty), "`] records.")]
                pub fn $all(&self) -> impl Iterator<Item = &$ty> + '_ {
                    self.iter::<$ty>()
                }

                #[doc = concat!("Typed lookup of a [`", stringify!($ty), "`].")]
                pub fn $get(&self, key: impl NodeKey) -> Option<&$ty> {
                    self.get::<$ty>(key)
                }
            )*
        }
    };
}

category_accessors! {
    AirAirline => air_airlines, get_air_airline;
    AirAirport => air_airports, get_air_airport;
    AirFlight => air_flights, get_air_flight;
    AirGate => air_gates, get_air_gate;
    BusCompany => bus_companies, get_bus_company;
    BusLine => bus_lines, get_bus_line;
    BusStop => bus_stops, get_bus_stop;
    RailCompany => rail_companies, get_rail_company;
    RailLine => rail_lines, get_rail_line;
    RailStation => rail_stations, get_rail_station;
    SeaCompany => sea_companies, get_sea_company;
    SeaLine => sea_lines, get_sea_line;
    SeaStop => sea_stops, get_sea_stop;
    SpawnWarp => spawn_warps, get_spawn_warp;
    Town => towns, get_town;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    const SAMPLE: &str = include_str!("../testdata/sample.json");

    fn sample() -> GatelogueData {
        SAMPLE.parse().unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let data = GatelogueData::new(1, "", Vec::<Node>::new());
        assert!(data.is_empty());
        assert!(data.node("1").is_none());
        assert_eq!(data.nodes().count(), 0);
        assert!(data.category_counts().values().all(|c| *c == 0));
    }

    #[test]
    fn test_lookup_node() {
        let data = sample();
        assert_eq!(data.len(), 19);

        for (id, node) in &data.nodes {
            let by_str = data.node(id.to_string()).unwrap();
            assert!(std::ptr::eq(by_str, node));
            assert_eq!(node.id(), *id);
        }

        assert!(data.node("999").is_none());
        assert!(data.node("not-an-id").is_none());
        assert!(data.node(999u32).is_none());
    }

    #[test]
    fn test_lookup_rejects_non_key_spellings() {
        let data = sample();
        assert!(data.node("1").is_some());
        for key in ["01", "+1", " 1 ", "1 ", "0x1", "1.0"] {
            assert!(data.node(key).is_none(), "{key:?}");
            assert!(data.get::<AirAirport>(key).is_none(), "{key:?}");
            assert!(data.by_category_name("airport", key).unwrap().is_none(), "{key:?}");
        }
    }

    #[test]
    fn test_listing_is_ascending_id_order() {
        let data = sample();
        let ids: Vec<u32> = data.nodes().map(|n| n.id().get()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        let gates: Vec<u32> = data.air_gates().map(|g| g.common.i.get()).collect();
        assert_eq!(gates, vec![2, 3, 7]);
    }

    #[test]
    fn test_lookup_typed() {
        let data = sample();
        for node in data.nodes() {
            for category in Category::iter() {
                let found = data.node_of(node.id(), category);
                assert_eq!(found.is_some(), node.category() == category);
            }
        }

        assert!(data.get::<AirAirport>("1").is_some());
        assert!(data.get::<AirGate>("1").is_none());
        assert!(data.get::<AirGate>("999").is_none());
    }

    #[test]
    fn test_require_reports_reason() {
        let data = sample();
        assert_eq!(data.require(Id::<AirGate>::new(2)).unwrap().code.as_deref(), Some("A1"));

        match data.require(Id::<AirGate>::new(1)) {
            Err(GatelogueError::IncorrectType { id, expected, actual }) => {
                assert_eq!(id, NodeId::new(1));
                assert_eq!(expected, Category::AirGate);
                assert_eq!(actual, Category::AirAirport);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            data.require(Id::<AirGate>::new(999)),
            Err(GatelogueError::NodeNotFound(id)) if id == NodeId::new(999)
        ));
    }

    #[test]
    fn test_list_by_category_partitions_table() {
        let data = sample();
        let mut total = 0;
        for category in Category::iter() {
            let listed: Vec<&Node> = data.nodes_of(category).collect();
            assert!(listed.iter().all(|n| n.category() == category));

            let mut ids: Vec<NodeId> = listed.iter().map(|n| n.id()).collect();
            ids.dedup();
            assert_eq!(ids.len(), listed.len());

            let expected = data.nodes().filter(|n| n.category() == category).count();
            assert_eq!(listed.len(), expected);
            assert_eq!(data.category_counts()[&category], expected);
            total += listed.len();
        }
        assert_eq!(total, data.len());

        assert_eq!(data.air_gates().count(), 3);
        assert_eq!(data.rail_stations().count(), 2);
        assert_eq!(data.towns().count(), 1);
    }

    #[test]
    fn test_dispatch_matches_typed_lookup() {
        let data = sample();
        for category in Category::iter() {
            for node in data.nodes_of(category) {
                let dispatched = data
                    .by_category_name(category.short_name(), node.id().to_string())
                    .unwrap()
                    .unwrap();
                let direct = data.node_of(node.id(), category).unwrap();
                assert!(std::ptr::eq(dispatched, direct));
            }
        }

        let airport = data.by_category_name("airport", "1").unwrap().unwrap();
        let direct = data.get_air_airport("1").unwrap();
        assert!(std::ptr::eq(airport.as_kind::<AirAirport>().unwrap(), direct));

        // Known name, wrong category or missing id: absent, not an error
        assert!(data.by_category_name("gate", "1").unwrap().is_none());
        assert!(data.by_category_name("station", "999").unwrap().is_none());
    }

    #[test]
    fn test_dispatch_unknown_category_is_error() {
        let data = sample();
        for name in ["planes", "Airport", "AirAirport", "", "rail station"] {
            assert!(matches!(
                data.by_category_name(name, "1"),
                Err(GatelogueError::UnknownCategory(n)) if n == name
            ));
        }
    }

    #[test]
    fn test_bidirectional_references() {
        let doc = json!({
            "version": 1,
            "timestamp": "2026-01-01T00:00:00Z",
            "nodes": {
                "1": {"type": "AirAirport", "i": 1, "source": [], "code": "ABC",
                      "gates": [{"v": 2, "s": []}], "world": null, "coordinates": null,
                      "proximity": {}, "shared_facility": []},
                "2": {"type": "AirGate", "i": 2, "source": [], "code": "A1",
                      "airport": {"v": 1, "s": []}, "flights": []}
            }
        });
        let data = GatelogueData::from_value(doc).unwrap();

        let airport = data.node_of("1", Category::AirAirport).unwrap().as_kind::<AirAirport>().unwrap();
        let gate = data.resolve(&airport.gates[0]).unwrap();
        assert_eq!(gate.code.as_deref(), Some("A1"));

        let back = data.resolve(&gate.airport).unwrap();
        assert!(std::ptr::eq(back, airport));
    }

    #[test]
    fn test_resolve_checks_category() {
        let data = sample();
        // Gate 2's airline reference, reinterpreted as an airport, must not resolve
        let gate = data.get_air_gate("2").unwrap();
        let airline_ref = gate.airline.as_ref().unwrap();
        assert_eq!(data.resolve(airline_ref).unwrap().name, "Blu Air");
        assert!(data.resolve_id(airline_ref.value().cast::<AirAirport>()).is_none());
    }

    #[test]
    fn test_resolve_all_skips_dangling() {
        let data = sample();
        let refs = vec![
            Sourced::bare(Id::<AirGate>::new(2)),
            Sourced::bare(Id::<AirGate>::new(999)),
            Sourced::bare(Id::<AirGate>::new(1)),
            Sourced::bare(Id::<AirGate>::new(3)),
        ];
        let codes: Vec<_> = data.resolve_all(&refs).filter_map(|g| g.code.as_deref()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);
    }

    #[test]
    fn test_node_round_trip() {
        let data = sample();
        for node in data.nodes() {
            let json = serde_json::to_string(node).unwrap();
            let back: Node = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, node);
            assert!(std::ptr::eq(data.node(back.id()).unwrap(), node));
        }

        let whole: GatelogueData = serde_json::to_string(&data).unwrap().parse().unwrap();
        assert_eq!(whole, data);
    }

    #[test]
    fn test_unknown_type_fails_whole_document() {
        let doc = json!({
            "version": 1,
            "timestamp": "",
            "nodes": {"1": {"type": "Hovercraft", "i": 1, "source": []}}
        });
        assert!(matches!(GatelogueData::from_value(doc), Err(GatelogueError::Decode(_))));
        assert!(GatelogueData::from_slice(b"{\"version\": 1").is_err());
    }

    #[test]
    fn test_colliding_keys_fail_whole_document() {
        let airline = |i: u32, name: &str| json!({"type": "AirAirline", "i": i, "source": [], "name": name});

        let padded = json!({
            "version": 1,
            "timestamp": "",
            "nodes": {"1": airline(1, "First"), "01": airline(1, "Second")}
        });
        assert!(matches!(GatelogueData::from_value(padded), Err(GatelogueError::Decode(_))));

        // serde_json::Value cannot hold a repeated key, so use raw text
        let repeated = r#"{"version": 1, "timestamp": "", "nodes": {
            "1": {"type": "AirAirline", "i": 1, "source": [], "name": "First"},
            "1": {"type": "AirAirline", "i": 1, "source": [], "name": "Second"}
        }}"#;
        match repeated.parse::<GatelogueData>() {
            Err(GatelogueError::Decode(e)) => assert!(e.to_string().contains("duplicate node id 1")),
            other => panic!("unexpected {other:?}"),
        }

        let mismatched = json!({
            "version": 1,
            "timestamp": "",
            "nodes": {"2": airline(1, "First")}
        });
        assert!(matches!(GatelogueData::from_value(mismatched), Err(GatelogueError::Decode(_))));
    }

    #[test]
    fn test_into_unsourced() {
        let data = sample();
        let bare = data.clone().into_unsourced().unwrap();

        assert_eq!(bare.len(), data.len());
        let gate = bare.get_air_gate("2").unwrap();
        assert!(!gate.airport.is_sourced());
        assert_eq!(gate.airport.value().get(), 1);
        assert_eq!(gate.common.source, vec!["MRT Wiki".to_string()]);

        let station = bare.get_rail_station("20").unwrap();
        let conn = &station.connections[&Id::<RailStation>::new(21)][0];
        assert!(!conn.is_sourced());
        assert!(!conn.direction.as_ref().unwrap().one_way.is_sourced());

        // References still resolve identically
        let airport = bare.get_air_airport("1").unwrap();
        let codes: Vec<_> = bare.resolve_all(&airport.gates).filter_map(|g| g.code.as_deref()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);
    }

    #[test]
    fn test_gates_at_airport() {
        let data = sample();
        let gates = data.gates_at_airport("abc").unwrap();
        let codes: Vec<_> = gates.iter().filter_map(|g| g.code.as_deref()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);

        assert_eq!(data.gates_at_airport("DEF").unwrap().len(), 1);
        assert!(data.gates_at_airport("XYZ").is_none());
    }

    #[test]
    fn test_nearby_and_shared_facilities() {
        let data = sample();

        let nearby = data.nearby("1");
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].0.id(), NodeId::new(20));
        assert!(nearby[0].1.explicit);

        let shared = data.shared_facilities("20");
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].category(), Category::AirAirport);

        // Not located / absent
        assert!(data.nearby("2").is_empty());
        assert!(data.shared_facilities("999").is_empty());
    }

    #[test]
    fn test_located_iteration() {
        let data = sample();
        let located: Vec<Category> = data.located().map(|(n, _)| n.category()).collect();
        assert_eq!(located.len(), 8);
        assert!(located.iter().all(|c| c.is_located()));
    }

    #[test]
    fn test_generated_at() {
        let data = sample();
        let at = data.generated_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2026, 10, 1));
        assert_eq!((at.hour(), at.minute()), (12, 30));

        let mut rfc = data.clone();
        rfc.timestamp = "2026-10-01T14:30:00+02:00".into();
        assert_eq!(rfc.generated_at().unwrap().hour(), 12);

        rfc.timestamp = "yesterday".into();
        assert!(rfc.generated_at().is_none());
    }
}
