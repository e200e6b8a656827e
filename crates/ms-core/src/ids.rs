use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the original multigraph.
///
/// String-backed so callers can keep their own naming. Synthetic nodes
/// introduced by splitting are never `NodeId`s; they live in a separate
/// variant of the split-graph node type.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:?})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key disambiguating parallel edges between the same ordered node pair.
///
/// Keys are only unique per `(source, target)`; two different pairs may
/// both carry key 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeKey(u32);

impl EdgeKey {
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for EdgeKey {
    fn from(key: u32) -> Self {
        Self(key)
    }
}

impl fmt::Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeKey({})", self.0)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_is_raw_name() {
        let id = NodeId::from("A");
        assert_eq!(id.to_string(), "A");
        assert_eq!(id.as_str(), "A");
        assert_eq!(format!("{id:?}"), "NodeId(\"A\")");
    }

    #[test]
    fn node_ids_order_lexicographically() {
        let mut ids = vec![NodeId::from("b"), NodeId::from("a"), NodeId::from("c")];
        ids.sort();
        let names: Vec<_> = ids.iter().map(NodeId::as_str).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&(NodeId::from("n1"), EdgeKey::new(3))).unwrap();
        assert_eq!(json, r#"["n1",3]"#);
    }
}
