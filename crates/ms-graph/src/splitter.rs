//! One-pass construction of the split graph from a multigraph.

use ms_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::SplitResult;
use crate::mapping::EdgeMapping;
use crate::multigraph::{MultiGraph, OriginalEdge};
use crate::split::{SplitEdge, SplitGraph, SplitNode};
use crate::validate;

/// Order in which original edges are fed to the splitter.
///
/// Synthetic-node ordinals are assigned in processing order, so this order
/// fixes which parallel edge stays direct and which synthetic node hosts
/// each of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrder {
    /// The multigraph's insertion order.
    #[default]
    Insertion,
    /// Sorted by `(source, target, key)`, independent of insertion order.
    Sorted,
}

/// Configuration for [`SplitMultiGraph::with_options`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub edge_order: EdgeOrder,
    /// Extra source nodes for the downstream algorithm. Carried through
    /// unchanged; the split itself does not read them.
    pub additional_starts: Vec<NodeId>,
    /// Extra sink nodes for the downstream algorithm. Carried through
    /// unchanged; the split itself does not read them.
    pub additional_ends: Vec<NodeId>,
}

/// A multigraph rewritten as a simple graph, together with the mapping
/// needed to translate results back.
///
/// Built once; there is no mutation API, so a value can be shared across
/// threads by reference.
#[derive(Debug, Clone)]
pub struct SplitMultiGraph {
    pub(crate) split: SplitGraph,
    pub(crate) mapping: EdgeMapping,
    additional_starts: Vec<NodeId>,
    additional_ends: Vec<NodeId>,
}

impl SplitMultiGraph {
    /// Split with default options (insertion order, no extra endpoints).
    pub fn new(graph: &MultiGraph) -> SplitResult<Self> {
        Self::with_options(graph, SplitOptions::default())
    }

    pub fn with_options(graph: &MultiGraph, options: SplitOptions) -> SplitResult<Self> {
        let mut split = SplitGraph::with_capacity(graph.node_count(), graph.edge_count());
        let mut mapping = EdgeMapping::default();

        for node in graph.nodes() {
            split.add_original_node(node.id.clone(), node.attrs.clone());
        }

        let mut edges: Vec<&OriginalEdge> = graph.edges().iter().collect();
        if options.edge_order == EdgeOrder::Sorted {
            edges.sort_by(|a, b| a.id.cmp(&b.id));
        }

        let mut synthetic = 0usize;
        for edge in edges {
            let id = &edge.id;
            let u = SplitNode::Original(id.source.clone());
            let v = SplitNode::Original(id.target.clone());
            let u_idx = split.add_node(u.clone());
            let v_idx = split.add_node(v.clone());

            if split.contains_edge(&u, &v) {
                // The pair's direct edge already owns one reverse entry.
                let ordinal = mapping.pair_len(&id.source, &id.target) - 1;
                let node = SplitNode::Synthetic {
                    source: id.source.clone(),
                    target: id.target.clone(),
                    ordinal,
                };
                tracing::trace!(edge = %id, via = %node, "splitting parallel edge");

                let s_idx = split.add_node(node.clone());
                split.add_edge(u_idx, s_idx, edge.attrs.clone());
                split.add_edge(s_idx, v_idx, edge.attrs.with_flow(0.0));

                mapping.record_forward(SplitEdge::new(u, node.clone()), id.clone());
                mapping.record_forward(SplitEdge::new(node.clone(), v), id.clone());
                mapping.record_entry_point(id, node);
                synthetic += 1;
            } else {
                split.add_edge(u_idx, v_idx, edge.attrs.clone());
                mapping.record_forward(SplitEdge::new(u, v.clone()), id.clone());
                mapping.record_entry_point(id, v);
            }
        }

        validate::validate_split(&split, &mapping)?;

        tracing::debug!(
            nodes = split.node_count(),
            edges = split.edge_count(),
            synthetic,
            original_edges = graph.edge_count(),
            "built split graph"
        );

        Ok(Self {
            split,
            mapping,
            additional_starts: options.additional_starts,
            additional_ends: options.additional_ends,
        })
    }

    /// The simple graph the downstream algorithm should run on.
    pub fn split_graph(&self) -> &SplitGraph {
        &self.split
    }

    pub fn mapping(&self) -> &EdgeMapping {
        &self.mapping
    }

    pub fn additional_starts(&self) -> &[NodeId] {
        &self.additional_starts
    }

    pub fn additional_ends(&self) -> &[NodeId] {
        &self.additional_ends
    }

    pub fn synthetic_node_count(&self) -> usize {
        self.split.synthetic_nodes().count()
    }
}
