//! Exclusion-set expansion for downstream search.

use std::collections::HashSet;

use crate::split::SplitEdge;
use crate::splitter::SplitMultiGraph;

impl SplitMultiGraph {
    /// Split edges leaving a synthetic node.
    ///
    /// These exit hops always carry zero flow and exist only to close the
    /// two-hop chain of a split parallel edge.
    pub fn synthetic_exit_edges(&self) -> impl Iterator<Item = SplitEdge> + '_ {
        self.split
            .edges()
            .filter(|(edge, _)| edge.source.is_synthetic())
            .map(|(edge, _)| edge)
    }

    /// `edges` plus every synthetic exit edge.
    ///
    /// Excluding an original parallel edge through its entry hop alone would
    /// leave the exit hop traversable; the expanded set covers both.
    pub fn expand_ignore_set(&self, edges: &HashSet<SplitEdge>) -> HashSet<SplitEdge> {
        let mut expanded = edges.clone();
        expanded.extend(self.synthetic_exit_edges());
        expanded
    }
}
