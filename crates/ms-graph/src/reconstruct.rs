//! Translation between split-graph results and original edge identities.
//!
//! All three translations return `SplitResult<Lookup<T>>`:
//! - `Err` only for a path hop that is not a split edge (a caller error)
//! - `Ok(Lookup::NotFound)` for a speculative lookup that matched nothing
//! - `Ok(Lookup::Found(..))` otherwise

use crate::error::{SplitError, SplitResult};
use crate::multigraph::EdgeId;
use crate::split::{SplitEdge, SplitNode};
use crate::splitter::SplitMultiGraph;

/// Outcome of a lookup that may legitimately match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound => None,
        }
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Self::Found(v) => Lookup::Found(v),
            Self::NotFound => Lookup::NotFound,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(v) => Lookup::Found(f(v)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::NotFound, Self::Found)
    }
}

/// Split-graph representation of one original edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitChain {
    /// The first edge of its pair: kept as a single split edge.
    Direct(SplitEdge),
    /// A later parallel edge: routed through a synthetic node.
    Split(SplitEdge, SplitEdge),
}

impl SplitChain {
    /// The split edges in path order (one or two).
    pub fn edges(&self) -> Vec<SplitEdge> {
        match self {
            Self::Direct(e) => vec![e.clone()],
            Self::Split(enter, exit) => vec![enter.clone(), exit.clone()],
        }
    }

    pub fn hop_count(&self) -> usize {
        match self {
            Self::Direct(_) => 1,
            Self::Split(..) => 2,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split(..))
    }
}

impl SplitMultiGraph {
    /// Translate a split-graph node path into the original edges it uses.
    ///
    /// Each original edge appears once: the exit hop of a split pair
    /// (synthetic -> target) resolves to the same original edge as its entry
    /// hop and is dropped.
    pub fn path_to_original(&self, path: &[SplitNode]) -> SplitResult<Lookup<Vec<EdgeId>>> {
        let mut hops = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let [u, v] = pair else { continue };
            let edge = SplitEdge::new(u.clone(), v.clone());
            let original = self
                .mapping
                .forward(&edge)
                .ok_or_else(|| SplitError::BrokenMapping {
                    from: u.clone(),
                    to: v.clone(),
                })?;
            if !u.is_synthetic() {
                hops.push(Hop { edge, original });
            }
        }
        Ok(Lookup::Found(merge_split_halves(hops)))
    }

    /// Original edge represented by a single split edge.
    pub fn edge_to_original(&self, edge: &SplitEdge) -> SplitResult<Lookup<&EdgeId>> {
        Ok(self.mapping.forward(edge).into())
    }

    /// Split-graph edges representing an original edge.
    pub fn original_to_split(&self, original: &EdgeId) -> SplitResult<Lookup<SplitChain>> {
        let Some(entry) = self.mapping.entry_point(original) else {
            return Ok(Lookup::NotFound);
        };
        let source = SplitNode::Original(original.source.clone());
        let chain = match entry {
            SplitNode::Synthetic { .. } => SplitChain::Split(
                SplitEdge::new(source, entry.clone()),
                SplitEdge::new(entry.clone(), SplitNode::Original(original.target.clone())),
            ),
            SplitNode::Original(_) => SplitChain::Direct(SplitEdge::new(source, entry.clone())),
        };
        Ok(Lookup::Found(chain))
    }
}

/// A kept path hop and the original edge it resolved to.
struct Hop<'a> {
    edge: SplitEdge,
    original: &'a EdgeId,
}

/// Combine adjacent hops `u -> s` and `s -> v` carrying the same key, with
/// `s` synthetic, into the single original edge `(u, v, key)`.
///
/// Hops leaving a synthetic node are dropped before this runs, so for paths
/// over a built split graph nothing is ever merged.
fn merge_split_halves(hops: Vec<Hop<'_>>) -> Vec<EdgeId> {
    let mut merged = Vec::with_capacity(hops.len());
    let mut iter = hops.into_iter().peekable();
    while let Some(first) = iter.next() {
        let joins = iter.peek().is_some_and(|second| {
            first.original.key == second.original.key
                && first.edge.target.is_synthetic()
                && second.edge.source == first.edge.target
        });
        if joins {
            if let Some(second) = iter.next() {
                tracing::warn!(first = %first.edge, second = %second.edge, "merging split halves");
                merged.push(EdgeId {
                    source: first.original.source.clone(),
                    target: second.original.target.clone(),
                    key: first.original.key,
                });
                continue;
            }
        }
        merged.push(first.original.clone());
    }
    merged
}
