//! Typed node identifiers.
//!
//! Every node in a snapshot is keyed by a small integer. The document stores
//! those integers as JSON object keys (strings) in the node table and in the
//! proximity/connection maps, but as plain numbers in reference fields, so
//! [`Id`] accepts both encodings when deserialising.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::node::Node;
use crate::sourced::Sourced;

/// Identifier of a node of kind `T`.
///
/// The marker is purely a compile-time hint about what the id is expected to
/// point at; resolving it still checks the node's discriminant.
pub struct Id<T> {
    raw: u32,
    _kind: PhantomData<fn() -> T>,
}

/// Identifier with no expectation about the node's category.
pub type NodeId = Id<Node>;

impl<T> Id<T> {
    pub const fn new(raw: u32) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    pub const fn get(self) -> u32 {
        self.raw
    }

    /// Reinterpret the id as pointing at another kind of node.
    pub const fn cast<U>(self) -> Id<U> {
        Id::new(self.raw)
    }

    pub const fn erase(self) -> NodeId {
        self.cast()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

/// A string that is not the canonical decimal form of a node id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not a node id: {0:?}")]
pub struct ParseIdError(pub String);

impl<T> FromStr for Id<T> {
    type Err = ParseIdError;

    /// Only the form a document key takes is accepted: ASCII digits with no
    /// sign, padding or leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(ParseIdError(s.to_owned()));
        }
        s.parse()
            .map(Self::new)
            .map_err(|_| ParseIdError(s.to_owned()))
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.raw)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `deserialize_any` so that buffered map keys (strings) reach `visit_str`
        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

struct IdVisitor<T>(PhantomData<fn() -> T>);

impl<T> Visitor<'_> for IdVisitor<T> {
    type Value = Id<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a node id as an integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(Id::new)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(Id::new)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Id<T>>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Anything that can name a node in the table.
///
/// This is where string and integer identifiers meet: a string names a node
/// only in the exact form the document uses as its key, so `"01"` or `" 1"`
/// name no node.
pub trait NodeKey {
    fn node_id(&self) -> Option<NodeId>;
}

impl NodeKey for &str {
    fn node_id(&self) -> Option<NodeId> {
        self.parse().ok()
    }
}

impl NodeKey for String {
    fn node_id(&self) -> Option<NodeId> {
        self.as_str().node_id()
    }
}

impl NodeKey for &String {
    fn node_id(&self) -> Option<NodeId> {
        self.as_str().node_id()
    }
}

impl NodeKey for u32 {
    fn node_id(&self) -> Option<NodeId> {
        Some(Id::new(*self))
    }
}

impl<T> NodeKey for Id<T> {
    fn node_id(&self) -> Option<NodeId> {
        Some(self.erase())
    }
}

impl<T> NodeKey for &Sourced<Id<T>> {
    fn node_id(&self) -> Option<NodeId> {
        Some(self.value().erase())
    }
}
