//! Graph-specific error types.

use ms_core::{CoreError, NodeId};
use thiserror::Error;

use crate::multigraph::EdgeId;
use crate::split::SplitNode;

pub type SplitResult<T> = Result<T, SplitError>;

/// Multigraph construction, splitting and translation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// An edge refers to a node that was never added.
    #[error("Edge {edge} refers to non-existent node {node}")]
    UnknownNode { edge: EdgeId, node: NodeId },

    /// The same node id was added twice.
    #[error("Node {node} was added more than once")]
    DuplicateNode { node: NodeId },

    /// Two edges share the same `(source, target, key)`.
    #[error("Edge {edge} was added more than once")]
    DuplicateEdge { edge: EdgeId },

    /// A hop on a supplied path is not an edge of the split graph.
    ///
    /// The path was not produced over this split graph; this is a caller
    /// consistency error and is never retried.
    #[error("Edge {from}->{to} not found in edge mapping")]
    BrokenMapping { from: SplitNode, to: SplitNode },

    /// The split graph or its mappings violate a structural invariant.
    #[error("Invariant violated: {what}")]
    Invariant { what: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
