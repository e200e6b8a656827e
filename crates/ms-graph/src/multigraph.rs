//! Original multigraph: the input side of the split.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use ms_core::{EdgeKey, NodeId, Real};
use serde::{Deserialize, Serialize};

use crate::error::SplitResult;
use crate::validate;

/// Opaque attribute payload for keys the splitter does not interpret.
pub type Extension = BTreeMap<String, serde_json::Value>;

/// Edge attributes: the `flow` value plus everything else, untouched.
///
/// Serialized flat, so `{"flow": 5.0, "weight": 2}` reads as
/// `flow = 5.0` with `weight` kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAttrs {
    pub flow: Real,
    #[serde(flatten)]
    pub extra: Extension,
}

impl EdgeAttrs {
    pub fn new(flow: Real) -> Self {
        Self {
            flow,
            extra: Extension::new(),
        }
    }

    /// Attach an extension value (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Copy of these attributes with `flow` replaced.
    pub fn with_flow(&self, flow: Real) -> Self {
        Self {
            flow,
            extra: self.extra.clone(),
        }
    }
}

/// Node attributes are opaque to the splitter.
pub type NodeAttrs = Extension;

/// Identity of an edge in the original multigraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    pub source: NodeId,
    pub target: NodeId,
    pub key: EdgeKey,
}

impl EdgeId {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        key: impl Into<EdgeKey>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.target, self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OriginalNode {
    pub id: NodeId,
    pub attrs: NodeAttrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OriginalEdge {
    pub id: EdgeId,
    pub attrs: EdgeAttrs,
}

/// A validated, immutable directed multigraph.
///
/// Nodes and edges enumerate in insertion order. That order is the
/// deterministic edge order the splitter consumes by default, so two graphs
/// built by the same sequence of calls split identically.
#[derive(Debug, Clone)]
pub struct MultiGraph {
    pub(crate) nodes: Vec<OriginalNode>,
    pub(crate) edges: Vec<OriginalEdge>,
    pub(crate) node_index: HashMap<NodeId, usize>,
    pub(crate) edge_index: HashMap<EdgeId, usize>,
}

impl MultiGraph {
    /// Return all nodes in insertion order.
    pub fn nodes(&self) -> &[OriginalNode] {
        &self.nodes
    }

    /// Return all edges in insertion order.
    pub fn edges(&self) -> &[OriginalEdge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&OriginalNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&OriginalEdge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// All parallel edges from `source` to `target`, in insertion order.
    pub fn edges_between<'a>(
        &'a self,
        source: &'a NodeId,
        target: &'a NodeId,
    ) -> impl Iterator<Item = &'a OriginalEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| &e.id.source == source && &e.id.target == target)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Builder for constructing a multigraph incrementally.
///
/// Use `add_node` and `add_edge` to build up the graph,
/// then call `build()` to validate and freeze it into an immutable `MultiGraph`.
#[derive(Debug, Default)]
pub struct MultiGraphBuilder {
    nodes: Vec<OriginalNode>,
    edges: Vec<OriginalEdge>,
    used_keys: HashMap<(NodeId, NodeId), HashSet<EdgeKey>>,
}

impl MultiGraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without attributes and return its id.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> NodeId {
        self.add_node_with_attrs(id, NodeAttrs::new())
    }

    pub fn add_node_with_attrs(&mut self, id: impl Into<NodeId>, attrs: NodeAttrs) -> NodeId {
        let id = id.into();
        self.nodes.push(OriginalNode {
            id: id.clone(),
            attrs,
        });
        id
    }

    /// Add an edge under the lowest key not yet used for `(source, target)`.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attrs: EdgeAttrs,
    ) -> EdgeKey {
        let source = source.into();
        let target = target.into();
        let used = self
            .used_keys
            .entry((source.clone(), target.clone()))
            .or_default();
        let key = (0..)
            .map(EdgeKey::new)
            .find(|k| !used.contains(k))
            .unwrap_or_default();
        self.push_edge(EdgeId { source, target, key }, attrs);
        key
    }

    /// Add an edge under an explicit key.
    ///
    /// Reusing a key for the same ordered pair is reported by `build()`.
    pub fn add_edge_with_key(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        key: impl Into<EdgeKey>,
        attrs: EdgeAttrs,
    ) -> EdgeId {
        let id = EdgeId::new(source, target, key);
        self.push_edge(id.clone(), attrs);
        id
    }

    fn push_edge(&mut self, id: EdgeId, attrs: EdgeAttrs) {
        self.used_keys
            .entry((id.source.clone(), id.target.clone()))
            .or_default()
            .insert(id.key);
        self.edges.push(OriginalEdge { id, attrs });
    }

    /// Validate and freeze the multigraph.
    pub fn build(self) -> SplitResult<MultiGraph> {
        let index = validate::validate_multigraph(&self.nodes, &self.edges)?;
        Ok(MultiGraph {
            nodes: self.nodes,
            edges: self.edges,
            node_index: index.nodes,
            edge_index: index.edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = MultiGraphBuilder::new();
        builder.add_node("A");
        builder.add_node("B");
        let k0 = builder.add_edge("A", "B", EdgeAttrs::new(5.0));
        let k1 = builder.add_edge("A", "B", EdgeAttrs::new(3.0));
        let k_other = builder.add_edge("B", "A", EdgeAttrs::new(1.0));
        let graph = builder.build().unwrap();

        assert_eq!(k0, EdgeKey::new(0));
        assert_eq!(k1, EdgeKey::new(1));
        assert_eq!(k_other, EdgeKey::new(0));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);

        let a = NodeId::from("A");
        let b = NodeId::from("B");
        let flows: Vec<Real> = graph.edges_between(&a, &b).map(|e| e.attrs.flow).collect();
        assert_eq!(flows, [5.0, 3.0]);
    }

    #[test]
    fn auto_key_skips_explicit_keys() {
        let mut builder = MultiGraphBuilder::new();
        builder.add_node("A");
        builder.add_node("B");
        builder.add_edge_with_key("A", "B", 0u32, EdgeAttrs::new(1.0));
        builder.add_edge_with_key("A", "B", 2u32, EdgeAttrs::new(1.0));
        assert_eq!(builder.add_edge("A", "B", EdgeAttrs::new(1.0)), EdgeKey::new(1));
        assert_eq!(builder.add_edge("A", "B", EdgeAttrs::new(1.0)), EdgeKey::new(3));
    }

    #[test]
    fn node_lookup() {
        let mut builder = MultiGraphBuilder::new();
        let mut attrs = NodeAttrs::new();
        attrs.insert("label".into(), "source".into());
        builder.add_node_with_attrs("s", attrs);
        let graph = builder.build().unwrap();

        let s = NodeId::from("s");
        assert!(graph.contains_node(&s));
        assert_eq!(graph.node(&s).unwrap().attrs["label"], "source");
        assert!(graph.node(&NodeId::from("t")).is_none());
    }

    #[test]
    fn edge_lookup_by_id() {
        let mut builder = MultiGraphBuilder::new();
        builder.add_node("A");
        builder.add_node("B");
        builder.add_edge("A", "B", EdgeAttrs::new(5.0));
        builder.add_edge("A", "B", EdgeAttrs::new(3.0));
        let graph = builder.build().unwrap();

        let second = graph.edge(&EdgeId::new("A", "B", 1u32)).unwrap();
        assert_eq!(second.attrs.flow, 3.0);
        assert!(graph.edge(&EdgeId::new("A", "B", 2u32)).is_none());
        assert!(graph.edge(&EdgeId::new("B", "A", 0u32)).is_none());
    }

    #[test]
    fn edge_attrs_flatten_extension_keys() {
        let attrs: EdgeAttrs =
            serde_json::from_str(r#"{"flow": 5, "weight": 2, "tag": "x"}"#).unwrap();
        assert_eq!(attrs.flow, 5.0);
        assert_eq!(attrs.extra["weight"], 2);
        assert_eq!(attrs.extra["tag"], "x");

        let back = serde_json::to_value(&attrs).unwrap();
        assert_eq!(back, serde_json::json!({"flow": 5.0, "weight": 2, "tag": "x"}));
    }

    #[test]
    fn with_flow_keeps_extension() {
        let attrs = EdgeAttrs::new(7.0).with("weight", 4);
        let zeroed = attrs.with_flow(0.0);
        assert_eq!(zeroed.flow, 0.0);
        assert_eq!(zeroed.extra, attrs.extra);
        assert_eq!(attrs.flow, 7.0);
    }
}
