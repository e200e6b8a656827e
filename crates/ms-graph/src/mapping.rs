//! Bidirectional edge-identity mapping between the split graph and the
//! original multigraph.
//!
//! - forward: every split edge -> the original edge it represents
//! - reverse: `(source, target)` then key -> the split-graph entry point,
//!   which is `Original(target)` for a direct edge or the synthetic node
//!   hosting a split parallel edge

use std::collections::{BTreeMap, HashMap};

use ms_core::{EdgeKey, NodeId};

use crate::multigraph::EdgeId;
use crate::split::{SplitEdge, SplitNode};

#[derive(Debug, Clone, Default)]
pub struct EdgeMapping {
    forward: HashMap<SplitEdge, EdgeId>,
    reverse: HashMap<(NodeId, NodeId), BTreeMap<EdgeKey, SplitNode>>,
}

impl EdgeMapping {
    pub(crate) fn record_forward(&mut self, edge: SplitEdge, original: EdgeId) {
        self.forward.insert(edge, original);
    }

    pub(crate) fn record_entry_point(&mut self, original: &EdgeId, entry: SplitNode) {
        self.reverse
            .entry((original.source.clone(), original.target.clone()))
            .or_default()
            .insert(original.key, entry);
    }

    /// Original edge represented by a split edge.
    pub fn forward(&self, edge: &SplitEdge) -> Option<&EdgeId> {
        self.forward.get(edge)
    }

    /// Split-graph entry point recorded for an original edge.
    pub fn entry_point(&self, original: &EdgeId) -> Option<&SplitNode> {
        self.reverse
            .get(&(original.source.clone(), original.target.clone()))?
            .get(&original.key)
    }

    /// Number of original edges recorded for the ordered pair.
    pub fn pair_len(&self, source: &NodeId, target: &NodeId) -> usize {
        self.reverse
            .get(&(source.clone(), target.clone()))
            .map_or(0, BTreeMap::len)
    }

    /// Number of split edges with a forward entry.
    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    /// Number of original edges with a reverse entry.
    pub fn reverse_len(&self) -> usize {
        self.reverse.values().map(BTreeMap::len).sum()
    }

    pub fn forward_entries(&self) -> impl Iterator<Item = (&SplitEdge, &EdgeId)> + '_ {
        self.forward.iter()
    }

    /// Every recorded original edge with its entry point, sorted by edge id.
    pub fn reverse_entries(&self) -> Vec<(EdgeId, &SplitNode)> {
        let mut entries: Vec<_> = self
            .reverse
            .iter()
            .flat_map(|((s, t), keys)| {
                keys.iter()
                    .map(move |(k, entry)| (EdgeId::new(s.clone(), t.clone(), *k), entry))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
