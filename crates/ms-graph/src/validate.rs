//! Graph validation logic.

use std::collections::{HashMap, HashSet};

use ms_core::{CoreError, NodeId, ensure_finite};
use petgraph::visit::EdgeRef;

use crate::error::{SplitError, SplitResult};
use crate::mapping::EdgeMapping;
use crate::multigraph::{EdgeId, OriginalEdge, OriginalNode};
use crate::split::{SplitEdge, SplitGraph, SplitNode};

/// Positions of nodes and edges in a validated multigraph.
#[derive(Debug, Default)]
pub(crate) struct GraphIndex {
    pub(crate) nodes: HashMap<NodeId, usize>,
    pub(crate) edges: HashMap<EdgeId, usize>,
}

/// Validate a multigraph before freezing it: ids are unique, every edge
/// endpoint exists, flows are finite.
///
/// Returns the node and edge indexes on success.
pub(crate) fn validate_multigraph(
    nodes: &[OriginalNode],
    edges: &[OriginalEdge],
) -> SplitResult<GraphIndex> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if node.id.as_str().is_empty() {
            return Err(CoreError::InvalidArg {
                what: "node id must not be empty",
            }
            .into());
        }
        if index.insert(node.id.clone(), i).is_some() {
            return Err(SplitError::DuplicateNode {
                node: node.id.clone(),
            });
        }
    }

    let mut edge_index = HashMap::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        for endpoint in [&edge.id.source, &edge.id.target] {
            if !index.contains_key(endpoint) {
                return Err(SplitError::UnknownNode {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        if edge_index.insert(edge.id.clone(), i).is_some() {
            return Err(SplitError::DuplicateEdge {
                edge: edge.id.clone(),
            });
        }
        ensure_finite(edge.attrs.flow, "edge flow")?;
    }

    Ok(GraphIndex {
        nodes: index,
        edges: edge_index,
    })
}

fn invariant(what: impl Into<String>) -> SplitError {
    SplitError::Invariant { what: what.into() }
}

/// Check the structural invariants of a freshly built split graph against
/// its mapping.
pub(crate) fn validate_split(split: &SplitGraph, mapping: &EdgeMapping) -> SplitResult<()> {
    let graph = split.graph();

    // At most one edge per ordered pair
    let mut pairs = HashSet::with_capacity(graph.edge_count());
    for e in graph.edge_references() {
        if !pairs.insert((e.source(), e.target())) {
            return Err(invariant(format!(
                "multiple edges {}->{}",
                graph[e.source()],
                graph[e.target()]
            )));
        }
    }

    // Synthetic nodes sit on exactly one two-hop chain whose exit carries no flow
    for node in split.synthetic_nodes() {
        let SplitNode::Synthetic { source, target, .. } = node else {
            continue;
        };
        if split.in_degree(node) != 1 || split.out_degree(node) != 1 {
            return Err(invariant(format!(
                "synthetic node {node} has in-degree {} and out-degree {}",
                split.in_degree(node),
                split.out_degree(node)
            )));
        }
        let entry = SplitNode::original(source.clone());
        let exit = SplitNode::original(target.clone());
        if !split.contains_edge(&entry, node) {
            return Err(invariant(format!(
                "synthetic node {node} is not entered from {source}"
            )));
        }
        match split.edge_attrs(node, &exit) {
            Some(attrs) if attrs.flow == 0.0 => {}
            Some(attrs) => {
                return Err(invariant(format!(
                    "exit edge {node}->{target} carries flow {}",
                    attrs.flow
                )));
            }
            None => {
                return Err(invariant(format!(
                    "synthetic node {node} does not exit to {target}"
                )));
            }
        }
    }

    // Every split edge maps forward
    for (edge, _) in split.edges() {
        if mapping.forward(&edge).is_none() {
            return Err(invariant(format!("split edge {edge} has no forward entry")));
        }
    }

    // No stale forward entries
    for (edge, original) in mapping.forward_entries() {
        if !split.contains_edge(&edge.source, &edge.target) {
            return Err(invariant(format!(
                "forward entry {edge} -> {original} names no split edge"
            )));
        }
    }

    // Reverse entries point back at split edges that map forward to them
    for (original, entry) in mapping.reverse_entries() {
        let source = SplitNode::Original(original.source.clone());
        let hops = match entry {
            SplitNode::Synthetic { .. } => vec![
                SplitEdge::new(source, entry.clone()),
                SplitEdge::new(entry.clone(), SplitNode::Original(original.target.clone())),
            ],
            SplitNode::Original(_) => vec![SplitEdge::new(source, entry.clone())],
        };
        for hop in hops {
            if mapping.forward(&hop) != Some(&original) {
                return Err(invariant(format!(
                    "reverse entry {original} does not round-trip through {hop}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::EdgeAttrs;

    fn node(id: &str) -> OriginalNode {
        OriginalNode {
            id: id.into(),
            attrs: Default::default(),
        }
    }

    fn edge(s: &str, t: &str, k: u32, flow: f64) -> OriginalEdge {
        OriginalEdge {
            id: EdgeId::new(s, t, k),
            attrs: EdgeAttrs::new(flow),
        }
    }

    #[test]
    fn validate_empty_graph() {
        let index = validate_multigraph(&[], &[]).unwrap();
        assert!(index.nodes.is_empty());
        assert!(index.edges.is_empty());
    }

    #[test]
    fn validate_unknown_endpoint() {
        let result = validate_multigraph(&[node("A")], &[edge("A", "Z", 0, 1.0)]);
        assert_eq!(
            result.unwrap_err(),
            SplitError::UnknownNode {
                edge: EdgeId::new("A", "Z", 0u32),
                node: "Z".into(),
            }
        );
    }

    #[test]
    fn validate_duplicate_node_and_edge() {
        assert!(matches!(
            validate_multigraph(&[node("A"), node("A")], &[]),
            Err(SplitError::DuplicateNode { .. })
        ));
        assert!(matches!(
            validate_multigraph(
                &[node("A"), node("B")],
                &[edge("A", "B", 0, 1.0), edge("A", "B", 0, 2.0)]
            ),
            Err(SplitError::DuplicateEdge { .. })
        ));
    }

    #[test]
    fn validate_non_finite_flow() {
        let result = validate_multigraph(&[node("A"), node("B")], &[edge("A", "B", 0, f64::NAN)]);
        assert!(matches!(
            result,
            Err(SplitError::Core(CoreError::NonFinite { .. }))
        ));
    }

    #[test]
    fn validate_empty_node_id() {
        assert!(matches!(
            validate_multigraph(&[node("")], &[]),
            Err(SplitError::Core(CoreError::InvalidArg { .. }))
        ));
    }

    #[test]
    fn split_with_nonzero_exit_flow_is_rejected() {
        let syn = SplitNode::Synthetic {
            source: "A".into(),
            target: "B".into(),
            ordinal: 0,
        };
        let original = EdgeId::new("A", "B", 1u32);

        let mut split = SplitGraph::default();
        let a = split.add_node("A".into());
        let b = split.add_node("B".into());
        let s = split.add_node(syn.clone());
        split.add_edge(a, s, EdgeAttrs::new(3.0));
        split.add_edge(s, b, EdgeAttrs::new(3.0));

        let mut mapping = EdgeMapping::default();
        mapping.record_forward(SplitEdge::new("A", syn.clone()), original.clone());
        mapping.record_forward(SplitEdge::new(syn.clone(), "B"), original.clone());
        mapping.record_entry_point(&original, syn);

        let err = validate_split(&split, &mapping).unwrap_err();
        assert!(err.to_string().contains("carries flow 3"));
    }

    #[test]
    fn split_with_missing_forward_entry_is_rejected() {
        let mut split = SplitGraph::default();
        let a = split.add_node("A".into());
        let b = split.add_node("B".into());
        split.add_edge(a, b, EdgeAttrs::new(1.0));

        let err = validate_split(&split, &EdgeMapping::default()).unwrap_err();
        assert!(matches!(err, SplitError::Invariant { .. }));
    }

    #[test]
    fn split_with_stale_forward_entry_is_rejected() {
        let mut split = SplitGraph::default();
        let a = split.add_node("A".into());
        let b = split.add_node("B".into());
        split.add_edge(a, b, EdgeAttrs::new(1.0));

        let original = EdgeId::new("A", "B", 0u32);
        let mut mapping = EdgeMapping::default();
        mapping.record_forward(SplitEdge::new("A", "B"), original.clone());
        mapping.record_forward(SplitEdge::new("B", "A"), original.clone());
        mapping.record_entry_point(&original, "B".into());

        let err = validate_split(&split, &mapping).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invariant violated: forward entry B->A -> (A, B, 0) names no split edge"
        );
    }
}
