//! ms-graph: split a directed multigraph into a simple graph and translate
//! results back.
//!
//! Provides:
//! - Original multigraph with incremental, validating builder
//! - Split graph (petgraph-backed, at most one edge per ordered pair)
//! - Forward/reverse edge-identity mapping
//! - Path and edge translation back to original edge ids
//! - Exclusion-set expansion over synthetic exit edges
//!
//! # Example
//!
//! ```
//! use ms_graph::{EdgeAttrs, EdgeId, MultiGraphBuilder, SplitMultiGraph, SplitNode};
//!
//! let mut builder = MultiGraphBuilder::new();
//! builder.add_node("A");
//! builder.add_node("B");
//! builder.add_edge("A", "B", EdgeAttrs::new(5.0));
//! builder.add_edge("A", "B", EdgeAttrs::new(3.0));
//! let graph = builder.build().unwrap();
//!
//! let split = SplitMultiGraph::new(&graph).unwrap();
//! assert_eq!(split.synthetic_node_count(), 1);
//!
//! let syn = split.split_graph().synthetic_nodes().next().unwrap().clone();
//! assert_eq!(syn.to_string(), "A_B_split_0");
//!
//! let path = [SplitNode::from("A"), syn, SplitNode::from("B")];
//! let edges = split.path_to_original(&path).unwrap().found().unwrap();
//! assert_eq!(edges, vec![EdgeId::new("A", "B", 1u32)]);
//! ```

pub mod error;
pub mod exclusion;
pub mod mapping;
pub mod multigraph;
pub mod reconstruct;
pub mod split;
pub mod splitter;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{SplitError, SplitResult};
pub use mapping::EdgeMapping;
pub use ms_core::{EdgeKey, NodeId};
pub use multigraph::{
    EdgeAttrs, EdgeId, MultiGraph, MultiGraphBuilder, NodeAttrs, OriginalEdge, OriginalNode,
};
pub use reconstruct::{Lookup, SplitChain};
pub use split::{SplitEdge, SplitGraph, SplitNode};
pub use splitter::{EdgeOrder, SplitMultiGraph, SplitOptions};
