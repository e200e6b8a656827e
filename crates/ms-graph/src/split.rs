//! Split graph: the simple-graph side of the split.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use ms_core::NodeId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::multigraph::{EdgeAttrs, NodeAttrs};

/// A node of the split graph.
///
/// Synthetic nodes carry their origin as data. Whether a node is synthetic is
/// decided by the variant alone, so an original node whose name happens to
/// look like `A_B_split_0` is still an original node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SplitNode {
    Original(NodeId),
    /// Hosts the `ordinal`-th split parallel edge from `source` to `target`.
    ///
    /// Ordinals start at 0 for the pair's second edge (the first stays
    /// direct), so the first synthetic node of `A -> B` is `A_B_split_0`
    /// rather than counting the direct edge's reverse entry.
    Synthetic {
        source: NodeId,
        target: NodeId,
        ordinal: usize,
    },
}

impl SplitNode {
    pub fn original(id: impl Into<NodeId>) -> Self {
        Self::Original(id.into())
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }

    pub fn as_original(&self) -> Option<&NodeId> {
        match self {
            Self::Original(id) => Some(id),
            Self::Synthetic { .. } => None,
        }
    }
}

impl From<NodeId> for SplitNode {
    fn from(id: NodeId) -> Self {
        Self::Original(id)
    }
}

impl From<&str> for SplitNode {
    fn from(name: &str) -> Self {
        Self::Original(NodeId::from(name))
    }
}

/// Write `id` with backslashes and underscores escaped, so the first bare `_`
/// of a synthetic name always ends the source id.
fn write_escaped(f: &mut fmt::Formatter<'_>, id: &NodeId) -> fmt::Result {
    for c in id.as_str().chars() {
        if c == '_' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

/// Original nodes render as their id. Synthetic nodes render as
/// `{source}_{target}_split_{ordinal}` with endpoint ids escaped, which keeps
/// names distinct across pairs such as `(A, B_C)` and `(A_B, C)`.
impl fmt::Display for SplitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original(id) => write!(f, "{id}"),
            Self::Synthetic {
                source,
                target,
                ordinal,
            } => {
                write_escaped(f, source)?;
                f.write_char('_')?;
                write_escaped(f, target)?;
                write!(f, "_split_{ordinal}")
            }
        }
    }
}

/// A directed edge of the split graph, identified by its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SplitEdge {
    pub source: SplitNode,
    pub target: SplitNode,
}

impl SplitEdge {
    pub fn new(source: impl Into<SplitNode>, target: impl Into<SplitNode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for SplitEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Simple directed graph over original and synthetic nodes.
///
/// Holds at most one edge per ordered pair. Only the splitter can add to it;
/// downstream algorithms get the petgraph value through [`SplitGraph::graph`].
#[derive(Debug, Clone, Default)]
pub struct SplitGraph {
    pub(crate) graph: DiGraph<SplitNode, EdgeAttrs>,
    pub(crate) index: HashMap<SplitNode, NodeIndex>,
    pub(crate) node_attrs: HashMap<NodeIndex, NodeAttrs>,
}

impl SplitGraph {
    pub(crate) fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
            node_attrs: HashMap::new(),
        }
    }

    /// Insert a node, returning the existing index if already present.
    pub(crate) fn add_node(&mut self, node: SplitNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node, idx);
        idx
    }

    pub(crate) fn add_original_node(&mut self, id: NodeId, attrs: NodeAttrs) -> NodeIndex {
        let idx = self.add_node(SplitNode::Original(id));
        if !attrs.is_empty() {
            self.node_attrs.insert(idx, attrs);
        }
        idx
    }

    /// Add an edge between two already-inserted nodes.
    pub(crate) fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, attrs: EdgeAttrs) {
        self.graph.add_edge(source, target, attrs);
    }

    /// The underlying petgraph graph, for traversal by downstream algorithms.
    pub fn graph(&self) -> &DiGraph<SplitNode, EdgeAttrs> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, node: &SplitNode) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub fn contains_node(&self, node: &SplitNode) -> bool {
        self.index.contains_key(node)
    }

    pub fn contains_edge(&self, source: &SplitNode, target: &SplitNode) -> bool {
        self.edge_attrs(source, target).is_some()
    }

    /// Attributes of the edge `source -> target`, if present.
    pub fn edge_attrs(&self, source: &SplitNode, target: &SplitNode) -> Option<&EdgeAttrs> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        let e = self.graph.find_edge(s, t)?;
        self.graph.edge_weight(e)
    }

    /// Attributes an original node carried in the multigraph.
    pub fn node_attrs(&self, node: &SplitNode) -> Option<&NodeAttrs> {
        let idx = self.node_index(node)?;
        self.node_attrs.get(&idx)
    }

    /// All nodes in insertion order (original nodes first).
    pub fn nodes(&self) -> impl Iterator<Item = &SplitNode> + '_ {
        self.graph.node_weights()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (SplitEdge, &EdgeAttrs)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                SplitEdge {
                    source: self.graph[e.source()].clone(),
                    target: self.graph[e.target()].clone(),
                },
                e.weight(),
            )
        })
    }

    pub fn synthetic_nodes(&self) -> impl Iterator<Item = &SplitNode> + '_ {
        self.nodes().filter(|n| n.is_synthetic())
    }

    /// Nodes reachable from `node` over one edge.
    pub fn successors<'a>(&'a self, node: &SplitNode) -> impl Iterator<Item = &'a SplitNode> + 'a {
        let idx = self.node_index(node);
        idx.into_iter().flat_map(move |i| {
            self.graph
                .neighbors_directed(i, Direction::Outgoing)
                .map(move |n| &self.graph[n])
        })
    }

    pub fn in_degree(&self, node: &SplitNode) -> usize {
        self.degree(node, Direction::Incoming)
    }

    pub fn out_degree(&self, node: &SplitNode) -> usize {
        self.degree(node, Direction::Outgoing)
    }

    fn degree(&self, node: &SplitNode, dir: Direction) -> usize {
        self.node_index(node)
            .map_or(0, |i| self.graph.edges_directed(i, dir).count())
    }
}
